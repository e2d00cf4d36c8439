use serde::{Deserialize, Serialize};

use super::{ConfigError, Penalty, TargetProfile};

/// A uniform `[lower, upper]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundPair {
    pub lower: f64,
    pub upper: f64,
}

impl BoundPair {
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Returns the midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        for value in [self.lower, self.upper] {
            if value.is_nan() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if self.lower > self.upper {
            return Err(ConfigError::InvertedBounds {
                name,
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// Shape constants `(B, C)` of the control-cost penalty.
///
/// `width = 0` selects the plain quadratic `t²/2`; otherwise the penalty is
/// a sextic core on `|t| ≤ width` blended into a linear tail of slope
/// `slope`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyShape {
    pub width: f64,
    pub slope: f64,
}

impl PenaltyShape {
    #[must_use]
    pub fn new(width: f64, slope: f64) -> Self {
        Self { width, slope }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(ConfigError::InvalidPenalty {
                reason: "width must be finite and non-negative",
            });
        }
        if !self.slope.is_finite() || self.slope < 0.0 {
            return Err(ConfigError::InvalidPenalty {
                reason: "slope must be finite and non-negative",
            });
        }
        if !Penalty::new(*self).coefficients().iter().all(|c| c.is_finite()) {
            return Err(ConfigError::InvalidPenalty {
                reason: "width is too small to blend the core into the tail",
            });
        }
        Ok(())
    }
}

/// Reference value the control deviation is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlReference {
    /// Penalize the control value itself.
    #[default]
    Zero,
    /// Penalize the distance to the target profile at the boundary point.
    Target,
}

/// Per-instance problem constants, everything but the grid resolution.
///
/// # Example
///
/// ```
/// use bcontrol_models::Parameters;
///
/// let params = Parameters::from_toml_str(r#"
///     alpha = 0.01
///     d_const = -20.0
///     target = "cubic"
///
///     [state_bounds]
///     lower = -1e20
///     upper = 3.5
///
///     [control_bounds]
///     lower = 0.0
///     upper = 10.0
///
///     [penalty]
///     width = 0.75
///     slope = 0.01
/// "#).unwrap();
///
/// assert_eq!(params.penalty.width, 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Weight of the control-cost term.
    pub alpha: f64,
    /// Bounds on every state value.
    pub state_bounds: BoundPair,
    /// Bounds on the boundary values acting as control.
    pub control_bounds: BoundPair,
    /// Constant source term `d` of the elliptic equation.
    pub d_const: f64,
    #[serde(default)]
    pub penalty: PenaltyShape,
    pub target: TargetProfile,
    #[serde(default)]
    pub control_reference: ControlReference,
}

impl Parameters {
    /// Validates that all constants are usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending constant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::InvalidWeight {
                name: "alpha",
                value: self.alpha,
            });
        }
        if !self.d_const.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "d_const",
                value: self.d_const,
            });
        }
        self.state_bounds.validate("state_bounds")?;
        self.control_bounds.validate("control_bounds")?;
        self.penalty.validate()
    }

    /// Parses and validates parameters from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input, or the validation
    /// error of [`Parameters::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Parameters {
        Parameters {
            alpha: 0.01,
            state_bounds: BoundPair::new(-1e20, 3.5),
            control_bounds: BoundPair::new(0.0, 10.0),
            d_const: -20.0,
            penalty: PenaltyShape::default(),
            target: TargetProfile::Cubic,
            control_reference: ControlReference::Zero,
        }
    }

    #[test]
    fn example_is_valid() {
        assert!(example().validate().is_ok());
    }

    #[test]
    fn rejects_negative_alpha() {
        let params = Parameters {
            alpha: -0.5,
            ..example()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidWeight { name: "alpha", .. })
        ));
    }

    #[test]
    fn rejects_inverted_control_bounds() {
        let params = Parameters {
            control_bounds: BoundPair::new(2.3, 1.6),
            ..example()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvertedBounds {
                name: "control_bounds",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_bound() {
        let params = Parameters {
            state_bounds: BoundPair::new(f64::NAN, 3.5),
            ..example()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonFinite {
                name: "state_bounds",
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_penalty_width() {
        let params = Parameters {
            penalty: PenaltyShape::new(-0.1, 0.01),
            ..example()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidPenalty { .. })
        ));
    }

    #[test]
    fn rejects_vanishing_penalty_width() {
        let params = Parameters {
            penalty: PenaltyShape::new(1e-100, 0.01),
            ..example()
        };
        let err = params.validate().expect_err("coefficients overflow");
        assert_eq!(
            err.to_string(),
            "invalid penalty shape: width is too small to blend the core into the tail"
        );
    }

    #[test]
    fn parses_toml_with_defaults() {
        let params = Parameters::from_toml_str(
            r#"
            alpha = 0.0
            d_const = -20.0
            target = "planar"
            control_reference = "target"

            [state_bounds]
            lower = -1e20
            upper = 3.2

            [control_bounds]
            lower = 1.6
            upper = 2.3
            "#,
        )
        .expect("valid parameters");

        assert_eq!(params.target, TargetProfile::Planar);
        assert_eq!(params.control_reference, ControlReference::Target);
        assert_eq!(params.penalty, PenaltyShape::default());
        assert_eq!(params.control_bounds, BoundPair::new(1.6, 2.3));
    }

    #[test]
    fn toml_values_are_validated() {
        let result = Parameters::from_toml_str(
            r#"
            alpha = -1.0
            d_const = -20.0
            target = "cubic"
            state_bounds = { lower = 0.0, upper = 1.0 }
            control_bounds = { lower = 0.0, upper = 1.0 }
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidWeight { .. })));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Parameters::from_toml_str("alpha = \"lots\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
