/// Initial primal point and, optionally, initial multipliers.
///
/// Solvers that do not warm start simply ignore the multiplier fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StartingPoint {
    pub x: Vec<f64>,
    /// Multipliers for the lower variable bounds.
    pub z_l: Option<Vec<f64>>,
    /// Multipliers for the upper variable bounds.
    pub z_u: Option<Vec<f64>>,
    /// Constraint multipliers.
    pub lambda: Option<Vec<f64>>,
}

impl StartingPoint {
    /// Creates a starting point without multiplier estimates.
    #[must_use]
    pub fn primal(x: Vec<f64>) -> Self {
        Self {
            x,
            z_l: None,
            z_u: None,
            lambda: None,
        }
    }

    /// Adds zero multiplier estimates for `m` constraints.
    #[must_use]
    pub fn with_zero_multipliers(mut self, m: usize) -> Self {
        let n = self.x.len();
        self.z_l = Some(vec![0.0; n]);
        self.z_u = Some(vec![0.0; n]);
        self.lambda = Some(vec![0.0; m]);
        self
    }
}
