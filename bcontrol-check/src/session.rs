use bcontrol_core::{Bounds, NlpInfo, NlpProblem, SparsityPattern, check_len};
use sprs::CsMat;

use crate::Error;

/// A problem together with its validated dimensions and sparsity structures.
///
/// Construction performs the structure phase of the two-phase contract
/// exactly once. All later values queries reuse the stored patterns, so
/// values are never requested before a structure exists.
#[derive(Debug)]
pub struct Session<'p, P> {
    problem: &'p P,
    info: NlpInfo,
    jacobian: SparsityPattern,
    hessian: SparsityPattern,
}

impl<'p, P: NlpProblem> Session<'p, P> {
    /// Queries and validates the problem's dimensions and structures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentStructure`] if the bounds or either
    /// pattern disagree with the declared dimensions, if a pattern has an
    /// entry out of range or a repeated entry, or if the Hessian pattern
    /// has an entry above the diagonal.
    pub fn new(problem: &'p P) -> Result<Self, Error> {
        let info = problem.info();
        validate_bounds(&info, &problem.bounds())?;

        let jacobian = problem.jacobian_structure();
        validate_pattern("jacobian", &jacobian, (info.m, info.n), info.nnz_jac_g)?;

        let hessian = problem.hessian_structure();
        validate_pattern("hessian", &hessian, (info.n, info.n), info.nnz_h_lag)?;
        if !hessian.is_lower_triangular() {
            return Err(Error::structure(
                "hessian",
                "entries above the diagonal",
            ));
        }

        log::debug!(
            "session: n = {}, m = {}, nnz_jac_g = {}, nnz_h_lag = {}",
            info.n,
            info.m,
            info.nnz_jac_g,
            info.nnz_h_lag,
        );

        Ok(Self {
            problem,
            info,
            jacobian,
            hessian,
        })
    }

    #[must_use]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    #[must_use]
    pub fn info(&self) -> &NlpInfo {
        &self.info
    }

    #[must_use]
    pub fn jacobian_pattern(&self) -> &SparsityPattern {
        &self.jacobian
    }

    #[must_use]
    pub fn hessian_pattern(&self) -> &SparsityPattern {
        &self.hessian
    }

    /// Evaluates the objective.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn objective(&self, x: &[f64]) -> Result<f64, Error> {
        self.problem.objective(x).map_err(Error::problem)
    }

    /// Evaluates the objective gradient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn gradient(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let mut grad = vec![0.0; self.info.n];
        self.problem
            .gradient(x, &mut grad)
            .map_err(Error::problem)?;
        Ok(grad)
    }

    /// Evaluates the constraint residuals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn constraints(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let mut g = vec![0.0; self.info.m];
        self.problem
            .constraints(x, &mut g)
            .map_err(Error::problem)?;
        Ok(g)
    }

    /// Evaluates the Jacobian values in pattern order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn jacobian_values(&self, x: &[f64]) -> Result<Vec<f64>, Error> {
        let mut values = vec![0.0; self.jacobian.len()];
        self.problem
            .jacobian_values(x, &self.jacobian, &mut values)
            .map_err(Error::problem)?;
        Ok(values)
    }

    /// Evaluates the Lagrangian Hessian values in pattern order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if `lambda` does not have one multiplier
    /// per constraint or the callback fails.
    pub fn hessian_values(
        &self,
        x: &[f64],
        obj_factor: f64,
        lambda: &[f64],
    ) -> Result<Vec<f64>, Error> {
        check_len("lambda", self.info.m, lambda.len()).map_err(Error::problem)?;
        let mut values = vec![0.0; self.hessian.len()];
        self.problem
            .hessian_values(x, obj_factor, lambda, &self.hessian, &mut values)
            .map_err(Error::problem)?;
        Ok(values)
    }

    /// Assembles the Jacobian at `x` as an `m × n` CSR matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn jacobian(&self, x: &[f64]) -> Result<CsMat<f64>, Error> {
        let values = self.jacobian_values(x)?;
        self.jacobian.assemble(&values).map_err(Error::problem)
    }

    /// Assembles the lower triangle of the Lagrangian Hessian at `x` as an
    /// `n × n` CSR matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if the callback fails.
    pub fn hessian(&self, x: &[f64], obj_factor: f64, lambda: &[f64]) -> Result<CsMat<f64>, Error> {
        let values = self.hessian_values(x, obj_factor, lambda)?;
        self.hessian.assemble(&values).map_err(Error::problem)
    }

    /// Evaluates `obj_factor·∇f(x) + J(x)ᵀ·lambda`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Problem`] if `lambda` does not have one multiplier
    /// per constraint or a callback fails.
    pub fn lagrangian_gradient(
        &self,
        x: &[f64],
        obj_factor: f64,
        lambda: &[f64],
    ) -> Result<Vec<f64>, Error> {
        check_len("lambda", self.info.m, lambda.len()).map_err(Error::problem)?;
        let mut grad = self.gradient(x)?;
        for g in &mut grad {
            *g *= obj_factor;
        }
        let values = self.jacobian_values(x)?;
        for (e, v) in self.jacobian.iter().zip(values) {
            grad[e.col] += lambda[e.row] * v;
        }
        Ok(grad)
    }
}

fn validate_bounds(info: &NlpInfo, bounds: &Bounds) -> Result<(), Error> {
    let lengths = [
        (bounds.x_l.len(), info.n, "x_l"),
        (bounds.x_u.len(), info.n, "x_u"),
        (bounds.g_l.len(), info.m, "g_l"),
        (bounds.g_u.len(), info.m, "g_u"),
    ];
    for (actual, expected, name) in lengths {
        if actual != expected {
            return Err(Error::structure(
                "bounds",
                format!("`{name}` has length {actual}, expected {expected}"),
            ));
        }
    }

    let inverted = bounds
        .x_l
        .iter()
        .zip(&bounds.x_u)
        .chain(bounds.g_l.iter().zip(&bounds.g_u))
        .any(|(l, u)| l > u);
    if inverted {
        return Err(Error::structure("bounds", "lower bound exceeds upper bound"));
    }
    Ok(())
}

fn validate_pattern(
    which: &'static str,
    pattern: &SparsityPattern,
    shape: (usize, usize),
    nnz: usize,
) -> Result<(), Error> {
    if pattern.shape() != shape {
        return Err(Error::structure(
            which,
            format!("shape {:?}, expected {shape:?}", pattern.shape()),
        ));
    }
    if pattern.len() != nnz {
        return Err(Error::structure(
            which,
            format!("{} entries, declared {nnz}", pattern.len()),
        ));
    }
    if !pattern.in_bounds() {
        return Err(Error::structure(which, "entry out of range"));
    }
    if pattern.has_duplicates() {
        return Err(Error::structure(which, "repeated entry"));
    }
    Ok(())
}
