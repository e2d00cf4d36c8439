use super::Derivative;

/// One analytic value compared against its finite-difference estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub row: usize,
    pub col: usize,
    /// Analytic value, zero for positions outside the sparsity pattern.
    pub analytic: f64,
    pub estimate: f64,
    /// Whether the position belongs to the reported sparsity pattern.
    pub in_pattern: bool,
}

impl Comparison {
    /// Returns `|analytic − estimate| / max(|analytic|, |estimate|, 1)`.
    #[must_use]
    pub fn relative_error(&self) -> f64 {
        let scale = self.analytic.abs().max(self.estimate.abs()).max(1.0);
        (self.analytic - self.estimate).abs() / scale
    }
}

/// Outcome of one derivative check.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub derivative: Derivative,
    /// Number of positions compared.
    pub compared: usize,
    /// Comparisons outside tolerance, in the order they were found.
    pub mismatches: Vec<Comparison>,
    /// Largest relative error over all comparisons.
    pub max_relative_error: f64,
    /// Set when an observer stopped the check before every variable was
    /// perturbed.
    pub stopped_early: bool,
}

impl Report {
    pub(super) fn new(derivative: Derivative) -> Self {
        Self {
            derivative,
            compared: 0,
            mismatches: Vec::new(),
            max_relative_error: 0.0,
            stopped_early: false,
        }
    }

    /// Returns true if every compared position agreed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}
