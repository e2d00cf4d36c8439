use super::PenaltyShape;

/// Control-cost penalty `Pen(t)` with exact first and second derivatives.
///
/// With `B = 0` this is the convex quadratic `t²/2`. With `B > 0` it is an
/// even sextic `PenA·t² + PenB·t⁴ + PenC·t⁶` on `|t| ≤ B` joined to the
/// linear tail `B²/2 + C·(|t| − B)`. The coefficients are solved so that
/// value, slope and curvature agree at `|t| = B`, which makes the penalty C²
/// everywhere and nonconvex inside the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalty {
    width: f64,
    slope: f64,
    pen_a: f64,
    pen_b: f64,
    pen_c: f64,
}

impl Penalty {
    /// Builds the penalty for a validated shape.
    #[must_use]
    pub fn new(shape: PenaltyShape) -> Self {
        let PenaltyShape { width: b, slope: c } = shape;
        #[allow(clippy::float_cmp)]
        if b == 0.0 {
            return Self {
                width: 0.0,
                slope: 0.0,
                pen_a: 0.5,
                pen_b: 0.0,
                pen_c: 0.0,
            };
        }

        // Matching Pen(B) = B²/2, Pen'(B) = C, Pen''(B) = 0.
        let r = c / b;
        let b2 = b * b;
        Self {
            width: b,
            slope: c,
            pen_a: 1.5 - 9.0 * r / 8.0,
            pen_b: (7.0 * r / 4.0 - 1.5) / b2,
            pen_c: (0.5 - 5.0 * r / 8.0) / (b2 * b2),
        }
    }

    /// Returns true for the plain quadratic.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_quadratic(&self) -> bool {
        self.width == 0.0
    }

    /// Returns the core coefficients `[PenA, PenB, PenC]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 3] {
        [self.pen_a, self.pen_b, self.pen_c]
    }

    /// `Pen(t)`
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        if self.is_quadratic() {
            0.5 * t * t
        } else if t.abs() > self.width {
            self.tail_value(t)
        } else {
            self.core_value(t)
        }
    }

    /// `Pen'(t)`
    #[must_use]
    pub fn first(&self, t: f64) -> f64 {
        if self.is_quadratic() {
            t
        } else if t > self.width {
            self.slope
        } else if t < -self.width {
            -self.slope
        } else {
            let t2 = t * t;
            let t3 = t * t2;
            let t5 = t3 * t2;
            2.0 * self.pen_a * t + 4.0 * self.pen_b * t3 + 6.0 * self.pen_c * t5
        }
    }

    /// `Pen''(t)`
    #[must_use]
    pub fn second(&self, t: f64) -> f64 {
        if self.is_quadratic() {
            1.0
        } else if t.abs() > self.width {
            0.0
        } else {
            let t2 = t * t;
            let t4 = t2 * t2;
            2.0 * self.pen_a + 12.0 * self.pen_b * t2 + 30.0 * self.pen_c * t4
        }
    }

    fn tail_value(&self, t: f64) -> f64 {
        0.5 * self.width * self.width + self.slope * (t.abs() - self.width)
    }

    fn core_value(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t4 * t2;
        self.pen_a * t2 + self.pen_b * t4 + self.pen_c * t6
    }
}
