use std::fmt;

use bcontrol_core::{Solution, SolverReturn};

use super::{Grid, Objective};

/// Summary of a final iterate, built when the solver hands back its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionReport {
    pub status: SolverReturn,
    pub objective: f64,
    /// Largest absolute PDE residual.
    pub max_violation: f64,
    /// Smallest face value.
    pub control_min: f64,
    /// Largest face value.
    pub control_max: f64,
    /// Root-mean-square distance to the target over the interior.
    pub tracking_rms: f64,
}

impl SolutionReport {
    pub(super) fn new(grid: &Grid, objective: &Objective, solution: &Solution<'_>) -> Self {
        let x = solution.x;
        let target = objective.target();

        let max_violation = solution.g.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()));

        let (control_min, control_max) = grid.faces().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), p| {
                let u = x[grid.y_index(p.i, p.j, p.k)];
                (lo.min(u), hi.max(u))
            },
        );

        let sum_sq: f64 = grid
            .interior()
            .map(|p| {
                let d = x[grid.y_index(p.i, p.j, p.k)] - target[[p.i, p.j, p.k]];
                d * d
            })
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let tracking_rms = (sum_sq / grid.num_interior() as f64).sqrt();

        Self {
            status: solution.status,
            objective: solution.objective,
            max_violation,
            control_min,
            control_max,
            tracking_rms,
        }
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: objective {:.6e}, max |g| {:.3e}, control in [{:.4}, {:.4}], tracking rms {:.4e}",
            self.status,
            self.objective,
            self.max_violation,
            self.control_min,
            self.control_max,
            self.tracking_rms,
        )
    }
}
