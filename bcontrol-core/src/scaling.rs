/// User-supplied scale factors for the solver's internal convergence tests.
///
/// Scaling changes only the conditioning the solver sees, never the model.
/// A negative objective factor would turn minimization into maximization,
/// so models should keep it positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaling {
    pub objective: f64,
    pub variables: Option<Vec<f64>>,
    pub constraints: Option<Vec<f64>>,
}

impl Scaling {
    /// Scales only the objective.
    #[must_use]
    pub fn objective_only(objective: f64) -> Self {
        Self {
            objective,
            variables: None,
            constraints: None,
        }
    }
}

impl Default for Scaling {
    fn default() -> Self {
        Self::objective_only(1.0)
    }
}
