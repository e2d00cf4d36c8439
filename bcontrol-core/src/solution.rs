/// Termination status reported by the solver when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverReturn {
    /// A locally optimal point was found within the desired tolerances.
    Success,
    /// Converged only to the acceptable tolerance level.
    StopAtAcceptablePoint,
    /// A feasible point was found for a square problem.
    FeasiblePointFound,
    /// The iteration limit was reached.
    MaxIterExceeded,
    /// The CPU or wall time limit was reached.
    TimeExceeded,
    /// Steps became too small to make progress.
    StopAtTinyStep,
    /// Converged to a point of local infeasibility.
    LocalInfeasibility,
    /// A callback asked the solver to stop.
    UserRequestedStop,
    /// The iterates diverged.
    DivergingIterates,
    /// The feasibility restoration phase failed.
    RestorationFailure,
    /// The search direction could not be computed.
    ErrorInStepComputation,
    /// A callback returned a NaN or infinite value.
    InvalidNumberDetected,
    /// There are more equality constraints than free variables.
    TooFewDegreesOfFreedom,
    /// Any other internal failure.
    InternalError,
}

impl SolverReturn {
    /// Returns true for the statuses that deliver a usable point.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(
            self,
            SolverReturn::Success
                | SolverReturn::StopAtAcceptablePoint
                | SolverReturn::FeasiblePointFound
        )
    }
}

/// The final iterate handed to [`crate::NlpProblem::finalize`].
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a> {
    pub status: SolverReturn,
    pub x: &'a [f64],
    pub z_l: &'a [f64],
    pub z_u: &'a [f64],
    pub g: &'a [f64],
    pub lambda: &'a [f64],
    pub objective: f64,
}
