use crate::{Bounds, NlpInfo, Scaling, Solution, SparsityPattern, StartingPoint};

/// A nonlinear program exposed to an external optimizer through callbacks.
///
/// The solver owns the iteration: it asks for sizes, bounds, and a starting
/// point once, then repeatedly evaluates the callbacks below at trial points.
/// Implementations are read-only after construction, so every callback
/// takes `&self` and a single instance may be evaluated from several threads.
///
/// Sparse derivatives follow a two-phase contract. The structure queries
/// return a [`SparsityPattern`] that is fixed for the lifetime of the
/// problem; the values callbacks take that pattern back and write one value
/// per structural entry, in pattern order.
pub trait NlpProblem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the problem dimensions and structural nonzero counts.
    fn info(&self) -> NlpInfo;

    /// Returns variable and constraint bounds.
    fn bounds(&self) -> Bounds;

    /// Returns the starting point and optional multiplier estimates.
    fn starting_point(&self) -> StartingPoint;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated at `x`.
    fn objective(&self, x: &[f64]) -> Result<f64, Self::Error>;

    /// Writes the objective gradient at `x` into `grad_f`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be evaluated at `x`.
    fn gradient(&self, x: &[f64], grad_f: &mut [f64]) -> Result<(), Self::Error>;

    /// Writes the constraint values at `x` into `g`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the constraints cannot be evaluated at `x`.
    fn constraints(&self, x: &[f64], g: &mut [f64]) -> Result<(), Self::Error>;

    /// Returns the structure of the constraint Jacobian.
    fn jacobian_structure(&self) -> SparsityPattern;

    /// Writes the Jacobian values at `x`, one per entry of `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `pattern` is not the problem's Jacobian
    /// pattern or the values cannot be evaluated at `x`.
    fn jacobian_values(
        &self,
        x: &[f64],
        pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Returns the lower-triangular structure of the Lagrangian Hessian.
    fn hessian_structure(&self) -> SparsityPattern;

    /// Writes the values of `obj_factor·∇²f(x) + Σ lambda[c]·∇²g_c(x)`, one
    /// per entry of `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `pattern` is not the problem's Hessian
    /// pattern or the values cannot be evaluated at `x`.
    fn hessian_values(
        &self,
        x: &[f64],
        obj_factor: f64,
        lambda: &[f64],
        pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Returns scale factors for the solver, or `None` to let the solver
    /// choose its own.
    fn scaling(&self) -> Option<Scaling> {
        None
    }

    /// Receives the final iterate once the solver stops.
    ///
    /// The default implementation does nothing.
    fn finalize(&self, _solution: &Solution<'_>) {}
}
