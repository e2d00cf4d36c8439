//! Dirichlet boundary control of a 3-D elliptic equation.
//!
//! The state `y` lives on a uniform `(N+2)³` lattice over the unit cube. The
//! `N³` interior values are tied together by a 7-point discretization of
//! `−Δy = −d`, one equality constraint per interior point. The boundary
//! values are decision variables like any other: they act as the control,
//! they are the Dirichlet data the stencil reads, and they are charged a
//! control cost in the objective.
//!
//! Every preset in [`Variant`] is a [`Parameters`] record; a problem is
//! built from parameters plus a grid resolution.

mod error;
mod grid;
mod hessian;
mod objective;
mod parameters;
mod pde;
mod penalty;
mod report;
mod scaling;
mod target;
mod variant;

pub use error::ConfigError;
pub use grid::{Grid, Point, PointKind};
pub use hessian::LagrangianHessian;
pub use objective::Objective;
pub use parameters::{BoundPair, ControlReference, Parameters, PenaltyShape};
pub use pde::{Pde, STENCIL};
pub use penalty::Penalty;
pub use report::SolutionReport;
pub use target::TargetProfile;
pub use variant::{ParseVariantError, Variant};

use bcontrol_core::{
    Bounds, EvalError, IndexStyle, NlpInfo, NlpProblem, Scaling, Solution, SparsityPattern,
    StartingPoint, check_len,
};

/// A configured boundary-control instance.
///
/// Construction validates every constant and precomputes the target field,
/// so all evaluation callbacks are infallible apart from argument-length
/// checks.
#[derive(Debug, Clone)]
pub struct BoundaryControl3D {
    grid: Grid,
    params: Parameters,
    objective: Objective,
    pde: Pde,
    index_style: IndexStyle,
}

impl BoundaryControl3D {
    /// Creates a problem with `n` interior points per dimension.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `n` is zero or too large, or if
    /// `params` fails [`Parameters::validate`].
    pub fn new(n: usize, params: Parameters) -> Result<Self, ConfigError> {
        params.validate()?;
        let grid = Grid::new(n)?;

        log::info!(
            "boundary control 3d: N = {n}, {} variables, {} constraints, alpha = {}, penalty (B = {}, C = {}), target {:?}",
            grid.num_points(),
            grid.num_interior(),
            params.alpha,
            params.penalty.width,
            params.penalty.slope,
            params.target,
        );

        Ok(Self {
            grid,
            params,
            objective: Objective::new(grid, &params),
            pde: Pde::new(grid, params.d_const),
            index_style: IndexStyle::C,
        })
    }

    /// Creates a problem from one of the preset variants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `n` is zero or too large.
    pub fn from_variant(variant: Variant, n: usize) -> Result<Self, ConfigError> {
        log::debug!("building preset {variant}");
        Self::new(n, variant.parameters())
    }

    /// Sets the index convention reported in [`NlpInfo`].
    #[must_use]
    pub fn with_index_style(mut self, index_style: IndexStyle) -> Self {
        self.index_style = index_style;
        self
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    #[must_use]
    pub fn objective_terms(&self) -> &Objective {
        &self.objective
    }

    #[must_use]
    pub fn pde(&self) -> &Pde {
        &self.pde
    }

    #[must_use]
    pub fn hessian(&self) -> LagrangianHessian<'_> {
        LagrangianHessian::new(self.grid, &self.objective, &self.pde)
    }

    /// Summarizes a final iterate.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::DimensionMismatch`] if `solution.x` or
    /// `solution.g` do not match the problem dimensions.
    pub fn report(&self, solution: &Solution<'_>) -> Result<SolutionReport, EvalError> {
        check_len("x", self.grid.num_points(), solution.x.len())?;
        check_len("g", self.pde.num_constraints(), solution.g.len())?;
        Ok(SolutionReport::new(&self.grid, &self.objective, solution))
    }

    fn check_x(&self, x: &[f64]) -> Result<(), EvalError> {
        check_len("x", self.grid.num_points(), x.len())
    }
}

fn check_pattern(
    shape: (usize, usize),
    nnz: usize,
    pattern: &SparsityPattern,
) -> Result<(), EvalError> {
    if pattern.len() != nnz {
        return Err(EvalError::PatternMismatch {
            expected: nnz,
            actual: pattern.len(),
        });
    }
    if pattern.shape() != shape {
        return Err(EvalError::PatternShapeMismatch {
            expected: shape,
            actual: pattern.shape(),
        });
    }
    Ok(())
}

impl NlpProblem for BoundaryControl3D {
    type Error = EvalError;

    fn info(&self) -> NlpInfo {
        NlpInfo {
            n: self.grid.num_points(),
            m: self.pde.num_constraints(),
            nnz_jac_g: self.pde.nnz(),
            nnz_h_lag: self.hessian().nnz(),
            index_style: self.index_style,
        }
    }

    /// State bounds everywhere, overridden by control bounds on the faces.
    /// Edge points keep the state bounds.
    fn bounds(&self) -> Bounds {
        let BoundPair { lower, upper } = self.params.state_bounds;
        let control = self.params.control_bounds;

        let mut bounds = Bounds::uniform(
            self.grid.num_points(),
            self.pde.num_constraints(),
            lower,
            upper,
        );
        for p in self.grid.faces() {
            bounds.set_variable(
                self.grid.y_index(p.i, p.j, p.k),
                control.lower,
                control.upper,
            );
        }
        bounds
    }

    fn starting_point(&self) -> StartingPoint {
        let mut x = vec![0.0; self.grid.num_points()];
        let u0 = self.params.control_bounds.midpoint();
        for p in self.grid.faces() {
            x[self.grid.y_index(p.i, p.j, p.k)] = u0;
        }
        StartingPoint::primal(x).with_zero_multipliers(self.pde.num_constraints())
    }

    fn objective(&self, x: &[f64]) -> Result<f64, EvalError> {
        self.check_x(x)?;
        Ok(self.objective.value(x))
    }

    fn gradient(&self, x: &[f64], grad_f: &mut [f64]) -> Result<(), EvalError> {
        self.check_x(x)?;
        check_len("grad_f", self.grid.num_points(), grad_f.len())?;
        self.objective.gradient(x, grad_f);
        Ok(())
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) -> Result<(), EvalError> {
        self.check_x(x)?;
        check_len("g", self.pde.num_constraints(), g.len())?;
        self.pde.residuals(x, g);
        Ok(())
    }

    fn jacobian_structure(&self) -> SparsityPattern {
        log::debug!("jacobian structure: {} entries", self.pde.nnz());
        self.pde.describe_structure()
    }

    fn jacobian_values(
        &self,
        x: &[f64],
        pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), EvalError> {
        self.check_x(x)?;
        check_pattern(
            (self.pde.num_constraints(), self.grid.num_points()),
            self.pde.nnz(),
            pattern,
        )?;
        check_len("values", pattern.len(), values.len())?;
        self.pde.evaluate_values(x, values);
        Ok(())
    }

    fn hessian_structure(&self) -> SparsityPattern {
        let hessian = self.hessian();
        log::debug!("hessian structure: {} diagonal entries", hessian.nnz());
        hessian.describe_structure()
    }

    fn hessian_values(
        &self,
        x: &[f64],
        obj_factor: f64,
        lambda: &[f64],
        pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), EvalError> {
        let hessian = self.hessian();
        self.check_x(x)?;
        check_len("lambda", self.pde.num_constraints(), lambda.len())?;
        let n = self.grid.num_points();
        check_pattern((n, n), hessian.nnz(), pattern)?;
        check_len("values", pattern.len(), values.len())?;
        hessian.evaluate_values(x, obj_factor, lambda, values);
        Ok(())
    }

    fn scaling(&self) -> Option<Scaling> {
        Some(scaling::user_scaling(&self.grid))
    }

    fn finalize(&self, solution: &Solution<'_>) {
        match self.report(solution) {
            Ok(report) if report.status.is_success() => log::info!("{report}"),
            Ok(report) => log::warn!("solver stopped without success: {report}"),
            Err(err) => log::warn!("cannot summarize final iterate: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use bcontrol_core::SolverReturn;

    #[test]
    fn dimensions_follow_grid() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex1, 3).expect("valid problem");
        let info = problem.info();

        assert_eq!(info.n, 125);
        assert_eq!(info.m, 27);
        assert_eq!(info.nnz_jac_g, 7 * 27);
        assert_eq!(info.nnz_h_lag, 27 + 6 * 9);
        assert_eq!(info.index_style, IndexStyle::C);

        let problem = BoundaryControl3D::from_variant(Variant::Ex4Bt, 3).expect("valid problem");
        assert_eq!(problem.info().nnz_h_lag, 27);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(matches!(
            BoundaryControl3D::from_variant(Variant::Ex1, 0),
            Err(ConfigError::GridTooSmall { n: 0 })
        ));

        let params = Parameters {
            alpha: f64::NAN,
            ..Variant::Ex1.parameters()
        };
        assert!(matches!(
            BoundaryControl3D::new(2, params),
            Err(ConfigError::InvalidWeight { .. })
        ));

        let params = Parameters {
            penalty: PenaltyShape::new(1e-100, 0.01),
            ..Variant::Ex1.parameters()
        };
        assert!(matches!(
            BoundaryControl3D::new(1, params),
            Err(ConfigError::InvalidPenalty { .. })
        ));
    }

    #[test]
    fn bounds_distinguish_faces_from_edges() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex3, 2).expect("valid problem");
        let grid = *problem.grid();
        let bounds = problem.bounds();

        for p in grid.points() {
            let idx = grid.y_index(p.i, p.j, p.k);
            let expected = match grid.kind(p) {
                PointKind::Face => (1.6, 2.3),
                PointKind::Interior | PointKind::Edge => (-1e20, 3.2),
            };
            assert_eq!((bounds.x_l[idx], bounds.x_u[idx]), expected);
        }
        assert_eq!(bounds.g_l.len(), 8);
        assert!(bounds.all_equalities());
        assert!(bounds.g_u.iter().all(|u| u.abs() < f64::EPSILON));
    }

    #[test]
    fn start_puts_faces_at_control_midpoint() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex3Bt, 2).expect("valid problem");
        let grid = *problem.grid();
        let start = problem.starting_point();

        for p in grid.points() {
            let value = start.x[grid.y_index(p.i, p.j, p.k)];
            if grid.kind(p) == PointKind::Face {
                assert_relative_eq!(value, 1.95);
            } else {
                assert_relative_eq!(value, 0.0);
            }
        }
        assert_eq!(start.lambda.as_deref(), Some(&[0.0; 8][..]));
        assert_eq!(start.z_l.map(|z| z.len()), Some(64));
    }

    #[test]
    fn rejects_wrongly_sized_arguments() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex1, 2).expect("valid problem");
        let x = vec![0.0; 63];

        assert_eq!(
            problem.objective(&x),
            Err(EvalError::DimensionMismatch {
                what: "x",
                expected: 64,
                actual: 63,
            })
        );

        let x = vec![0.0; 64];
        let mut g = vec![0.0; 7];
        assert!(matches!(
            problem.constraints(&x, &mut g),
            Err(EvalError::DimensionMismatch { what: "g", .. })
        ));
    }

    #[test]
    fn values_require_the_matching_pattern() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex1, 2).expect("valid problem");
        let x = vec![1.0; 64];
        let jac = problem.jacobian_structure();
        let hess = problem.hessian_structure();

        let mut values = vec![0.0; hess.len()];
        assert_eq!(
            problem.jacobian_values(&x, &hess, &mut values),
            Err(EvalError::PatternMismatch {
                expected: jac.len(),
                actual: hess.len(),
            })
        );

        let mut values = vec![0.0; jac.len()];
        problem
            .jacobian_values(&x, &jac, &mut values)
            .expect("matching pattern");

        let mut values = vec![0.0; hess.len()];
        problem
            .hessian_values(&x, 1.0, &[0.0; 8], &hess, &mut values)
            .expect("matching pattern");
    }

    #[test]
    fn equal_sized_patterns_are_told_apart() {
        // With N = 1 both patterns have seven entries.
        let problem = BoundaryControl3D::from_variant(Variant::Ex1, 1).expect("valid problem");
        let x = vec![1.0; 27];
        let jac = problem.jacobian_structure();
        let hess = problem.hessian_structure();
        assert_eq!(jac.len(), hess.len());

        let mut values = vec![0.0; 7];
        assert_eq!(
            problem.jacobian_values(&x, &hess, &mut values),
            Err(EvalError::PatternShapeMismatch {
                expected: (1, 27),
                actual: (27, 27),
            })
        );
        assert_eq!(
            problem.hessian_values(&x, 1.0, &[0.0], &jac, &mut values),
            Err(EvalError::PatternShapeMismatch {
                expected: (27, 27),
                actual: (1, 27),
            })
        );
    }

    #[test]
    fn scaling_is_objective_only() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex2, 1).expect("valid problem");
        let scaling = problem.scaling().expect("scaling provided");
        assert_relative_eq!(scaling.objective, 8.0);
        assert!(scaling.variables.is_none());
    }

    #[test]
    fn report_checks_dimensions() {
        let problem = BoundaryControl3D::from_variant(Variant::Ex1, 1).expect("valid problem");
        let x = vec![0.0; 27];
        let solution = Solution {
            status: SolverReturn::MaxIterExceeded,
            x: &x,
            z_l: &[],
            z_u: &[],
            g: &[0.0, 0.0],
            lambda: &[0.0],
            objective: 1.0,
        };
        assert!(matches!(
            problem.report(&solution),
            Err(EvalError::DimensionMismatch { what: "g", .. })
        ));

        // Logging the failure must not panic.
        problem.finalize(&solution);
    }
}
