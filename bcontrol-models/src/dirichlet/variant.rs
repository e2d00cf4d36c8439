use std::{fmt, str::FromStr};

use thiserror::Error;

use super::{BoundPair, ControlReference, Parameters, PenaltyShape, TargetProfile};

/// The fixed family of preset problem instances.
///
/// Each variant pairs a control weight, bounds, a penalty shape and a target
/// profile. Variants ending in `Bt` carry the blended nonconvex penalty in
/// place of the quadratic control cost. The penalty is scaled by `alpha`, so
/// `Ex2Bt` and `Ex4Bt` (where `alpha = 0`) evaluate exactly like `Ex2` and
/// `Ex4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Ex1,
    Ex1Bt,
    Ex1Bta,
    Ex2,
    Ex2Bt,
    Ex3,
    Ex3Bt,
    Ex4,
    Ex4Bt,
}

const WIDE_STATE: BoundPair = BoundPair {
    lower: -1e20,
    upper: 3.5,
};
const TIGHT_STATE: BoundPair = BoundPair {
    lower: -1e20,
    upper: 3.2,
};
const WIDE_CONTROL: BoundPair = BoundPair {
    lower: 0.0,
    upper: 10.0,
};
const TIGHT_CONTROL: BoundPair = BoundPair {
    lower: 1.6,
    upper: 2.3,
};
const QUADRATIC: PenaltyShape = PenaltyShape {
    width: 0.0,
    slope: 0.0,
};
const BLENDED: PenaltyShape = PenaltyShape {
    width: 0.75,
    slope: 0.01,
};
const BLENDED_NARROW: PenaltyShape = PenaltyShape {
    width: 0.5,
    slope: 0.01,
};

impl Variant {
    pub const ALL: [Variant; 9] = [
        Variant::Ex1,
        Variant::Ex1Bt,
        Variant::Ex1Bta,
        Variant::Ex2,
        Variant::Ex2Bt,
        Variant::Ex3,
        Variant::Ex3Bt,
        Variant::Ex4,
        Variant::Ex4Bt,
    ];

    /// Returns the preset constants of this variant.
    #[must_use]
    pub fn parameters(self) -> Parameters {
        let (alpha, state_bounds, control_bounds, penalty, target) = match self {
            Variant::Ex1 => (0.01, WIDE_STATE, WIDE_CONTROL, QUADRATIC, TargetProfile::Cubic),
            Variant::Ex1Bt => (0.01, WIDE_STATE, WIDE_CONTROL, BLENDED, TargetProfile::Cubic),
            Variant::Ex1Bta => (
                0.01,
                WIDE_STATE,
                WIDE_CONTROL,
                BLENDED_NARROW,
                TargetProfile::Planar,
            ),
            Variant::Ex2 => (0.0, WIDE_STATE, WIDE_CONTROL, QUADRATIC, TargetProfile::Cubic),
            Variant::Ex2Bt => (0.0, WIDE_STATE, WIDE_CONTROL, BLENDED, TargetProfile::Cubic),
            Variant::Ex3 => (0.01, TIGHT_STATE, TIGHT_CONTROL, QUADRATIC, TargetProfile::Cubic),
            Variant::Ex3Bt => (0.01, TIGHT_STATE, TIGHT_CONTROL, BLENDED, TargetProfile::Cubic),
            Variant::Ex4 => (0.0, TIGHT_STATE, TIGHT_CONTROL, QUADRATIC, TargetProfile::Cubic),
            Variant::Ex4Bt => (0.0, TIGHT_STATE, TIGHT_CONTROL, BLENDED, TargetProfile::Cubic),
        };

        Parameters {
            alpha,
            state_bounds,
            control_bounds,
            d_const: -20.0,
            penalty,
            target,
            control_reference: ControlReference::Zero,
        }
    }

    /// Stable lowercase name, e.g. `"ex1-bt"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Ex1 => "ex1",
            Variant::Ex1Bt => "ex1-bt",
            Variant::Ex1Bta => "ex1-bta",
            Variant::Ex2 => "ex2",
            Variant::Ex2Bt => "ex2-bt",
            Variant::Ex3 => "ex3",
            Variant::Ex3Bt => "ex3-bt",
            Variant::Ex4 => "ex4",
            Variant::Ex4Bt => "ex4-bt",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown problem variant `{0}`")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError(s.to_owned()))
    }
}
