use ndarray::Array3;

use super::{ControlReference, Grid, Parameters, Penalty, Point};

/// Discretized objective
///
/// ```text
/// f(y) = (h³/2)·Σ_interior (y − y_d)² + α·h²·Σ_faces Pen(u − r)
/// ```
///
/// where `u` are the face values of the state and `r` is either zero or the
/// target at that face point. Every variable enters at most one term, so
/// value and gradient are a single pass over the grid.
#[derive(Debug, Clone)]
pub struct Objective {
    grid: Grid,
    tracking_weight: f64,
    control_weight: f64,
    penalty: Penalty,
    target: Array3<f64>,
    reference: ControlReference,
}

impl Objective {
    pub(super) fn new(grid: Grid, params: &Parameters) -> Self {
        Self {
            grid,
            tracking_weight: 0.5 * grid.hhh(),
            control_weight: params.alpha * grid.hh(),
            penalty: Penalty::new(params.penalty),
            target: params.target.sample(&grid),
            reference: params.control_reference,
        }
    }

    /// Weight `w = h³/2` of each squared tracking deviation.
    #[must_use]
    pub fn tracking_weight(&self) -> f64 {
        self.tracking_weight
    }

    /// Weight `α·h²` of each face penalty.
    #[must_use]
    pub fn control_weight(&self) -> f64 {
        self.control_weight
    }

    #[must_use]
    pub fn penalty(&self) -> &Penalty {
        &self.penalty
    }

    /// Target profile sampled at every grid point, indexed `[[i, j, k]]`.
    #[must_use]
    pub fn target(&self) -> &Array3<f64> {
        &self.target
    }

    /// Returns true if face values enter the objective.
    #[must_use]
    pub fn has_control_term(&self) -> bool {
        self.control_weight > 0.0
    }

    /// Evaluates the objective.
    ///
    /// `x` must have one entry per grid point.
    #[must_use]
    pub fn value(&self, x: &[f64]) -> f64 {
        let tracking: f64 = self
            .grid
            .interior()
            .map(|p| {
                let d = self.tracking_deviation(x, p);
                d * d
            })
            .sum();

        let control: f64 = if self.has_control_term() {
            self.grid
                .faces()
                .map(|p| self.penalty.value(self.control_deviation(x, p)))
                .sum()
        } else {
            0.0
        };

        self.tracking_weight * tracking + self.control_weight * control
    }

    /// Writes the objective gradient into `grad`, zeroing variables that
    /// enter neither term.
    pub fn gradient(&self, x: &[f64], grad: &mut [f64]) {
        grad.fill(0.0);

        for p in self.grid.interior() {
            grad[self.var(p)] = 2.0 * self.tracking_weight * self.tracking_deviation(x, p);
        }

        if self.has_control_term() {
            for p in self.grid.faces() {
                grad[self.var(p)] =
                    self.control_weight * self.penalty.first(self.control_deviation(x, p));
            }
        }
    }

    /// Second derivative of the tracking term with respect to an interior value.
    pub(super) fn tracking_curvature(&self) -> f64 {
        2.0 * self.tracking_weight
    }

    /// Second derivative of the control term with respect to face value `p`.
    pub(super) fn control_curvature(&self, x: &[f64], p: Point) -> f64 {
        self.control_weight * self.penalty.second(self.control_deviation(x, p))
    }

    fn var(&self, p: Point) -> usize {
        self.grid.y_index(p.i, p.j, p.k)
    }

    fn tracking_deviation(&self, x: &[f64], p: Point) -> f64 {
        x[self.var(p)] - self.target[[p.i, p.j, p.k]]
    }

    fn control_deviation(&self, x: &[f64], p: Point) -> f64 {
        let u = x[self.var(p)];
        match self.reference {
            ControlReference::Zero => u,
            ControlReference::Target => u - self.target[[p.i, p.j, p.k]],
        }
    }
}
