//! Finite-difference checks of analytic derivatives.
//!
//! Every check perturbs one variable at a time, forms a central difference
//! of a vector-valued function, and compares the resulting column with the
//! analytic column. Positions outside the reported sparsity pattern are
//! compared too, so a pattern that misses a nonzero is caught as well as a
//! wrong value.

mod config;
mod report;

#[cfg(test)]
pub(crate) mod toy;

pub use config::Config;
pub use report::{Comparison, Report};

use bcontrol_core::NlpProblem;

use crate::{Error, Observer, Session};

/// The derivative being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivative {
    /// Objective gradient, reported as row 0.
    Gradient,
    /// Constraint Jacobian.
    Jacobian,
    /// Lagrangian Hessian, compared over the full symmetric matrix.
    Hessian,
}

/// Control actions supported by the derivative checks.
pub enum Action {
    /// Stop checking and return the report collected so far.
    StopEarly,
}

/// Event emitted for every compared position.
pub struct Event<'a> {
    pub derivative: Derivative,
    pub comparison: &'a Comparison,
    /// Whether the comparison is within tolerance.
    pub agrees: bool,
}

/// Checks the objective gradient at `x`.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_gradient<P, Obs>(
    session: &Session<'_, P>,
    x: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Report, Error>
where
    P: NlpProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let grad = session.gradient(x)?;
    compare_columns(
        Derivative::Gradient,
        x,
        config,
        1,
        |_, col| Some(grad[col]),
        |xp| Ok(vec![session.objective(xp)?]),
        observer,
    )
}

/// Checks the constraint Jacobian at `x`.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_jacobian<P, Obs>(
    session: &Session<'_, P>,
    x: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Report, Error>
where
    P: NlpProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let jac = session.jacobian(x)?;
    compare_columns(
        Derivative::Jacobian,
        x,
        config,
        session.info().m,
        |row, col| jac.get(row, col).copied(),
        |xp| session.constraints(xp),
        observer,
    )
}

/// Checks the Lagrangian Hessian at `x` for the given objective factor and
/// constraint multipliers.
///
/// The estimate differentiates `obj_factor·∇f + Jᵀ·lambda`, so the check
/// relies on the gradient and Jacobian being correct.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_hessian<P, Obs>(
    session: &Session<'_, P>,
    x: &[f64],
    obj_factor: f64,
    lambda: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Report, Error>
where
    P: NlpProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let hess = session.hessian(x, obj_factor, lambda)?;
    compare_columns(
        Derivative::Hessian,
        x,
        config,
        session.info().n,
        // Only the lower triangle is stored.
        |row, col| hess.get(row.max(col), row.min(col)).copied(),
        |xp| session.lagrangian_gradient(xp, obj_factor, lambda),
        observer,
    )
}

/// Runs [`check_gradient`] without observation.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_gradient_unobserved<P: NlpProblem>(
    session: &Session<'_, P>,
    x: &[f64],
    config: &Config,
) -> Result<Report, Error> {
    check_gradient(session, x, config, ())
}

/// Runs [`check_jacobian`] without observation.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_jacobian_unobserved<P: NlpProblem>(
    session: &Session<'_, P>,
    x: &[f64],
    config: &Config,
) -> Result<Report, Error> {
    check_jacobian(session, x, config, ())
}

/// Runs [`check_hessian`] without observation.
///
/// # Errors
///
/// Returns an error if the config is invalid or a problem callback fails.
pub fn check_hessian_unobserved<P: NlpProblem>(
    session: &Session<'_, P>,
    x: &[f64],
    obj_factor: f64,
    lambda: &[f64],
    config: &Config,
) -> Result<Report, Error> {
    check_hessian(session, x, obj_factor, lambda, config, ())
}

/// Compares `rows × x.len()` analytic values with central differences of
/// `eval`, one column per perturbed variable.
fn compare_columns<A, F, Obs>(
    derivative: Derivative,
    x: &[f64],
    config: &Config,
    rows: usize,
    analytic: A,
    mut eval: F,
    mut observer: Obs,
) -> Result<Report, Error>
where
    A: Fn(usize, usize) -> Option<f64>,
    F: FnMut(&[f64]) -> Result<Vec<f64>, Error>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut report = Report::new(derivative);
    let mut xp = x.to_vec();
    let mut xm = x.to_vec();

    for col in 0..x.len() {
        let step = config.step(x[col]);
        xp[col] = x[col] + step;
        xm[col] = x[col] - step;
        let fp = eval(&xp)?;
        let fm = eval(&xm)?;
        let width = xp[col] - xm[col];
        xp[col] = x[col];
        xm[col] = x[col];

        for row in 0..rows {
            let estimate = (fp[row] - fm[row]) / width;
            let stored = analytic(row, col);

            // Unstored positions are only compared when the estimate is
            // distinguishable from zero.
            if stored.is_none() && config.agrees(0.0, estimate) {
                continue;
            }

            let comparison = Comparison {
                row,
                col,
                analytic: stored.unwrap_or(0.0),
                estimate,
                in_pattern: stored.is_some(),
            };
            let agrees = config.agrees(comparison.analytic, estimate);

            report.compared += 1;
            report.max_relative_error = report
                .max_relative_error
                .max(comparison.relative_error());
            if !agrees {
                log::debug!(
                    "{derivative:?} mismatch at ({row}, {col}): analytic {:e}, estimate {estimate:e}{}",
                    comparison.analytic,
                    if comparison.in_pattern {
                        ""
                    } else {
                        " (outside pattern)"
                    },
                );
                report.mismatches.push(comparison);
            }

            let event = Event {
                derivative,
                comparison: &comparison,
                agrees,
            };
            if let Some(action) = observer.observe(&event) {
                match action {
                    Action::StopEarly => {
                        report.stopped_early = true;
                        return Ok(report);
                    }
                }
            }
        }
    }

    log::info!(
        "{derivative:?} check: {} compared, {} mismatches, max relative error {:.3e}",
        report.compared,
        report.mismatches.len(),
        report.max_relative_error,
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use simplelog::{Config as LogConfig, LevelFilter, TestLogger};
    use toy::Rosenbrock;

    const X: [f64; 2] = [0.7, -0.4];

    fn init_logger() {
        let _ = TestLogger::init(LevelFilter::Debug, LogConfig::default());
    }

    #[test]
    fn correct_derivatives_pass() {
        init_logger();
        let problem = Rosenbrock::default();
        let session = Session::new(&problem).expect("consistent structures");
        let config = Config::default();

        let grad = check_gradient_unobserved(&session, &X, &config).expect("gradient check");
        assert!(grad.passed());
        assert_eq!(grad.compared, 2);

        let jac = check_jacobian_unobserved(&session, &X, &config).expect("jacobian check");
        assert!(jac.passed());

        let hess =
            check_hessian_unobserved(&session, &X, 0.5, &[2.0], &config).expect("hessian check");
        assert!(hess.passed(), "{:?}", hess.mismatches);
        assert_eq!(hess.compared, 4);
    }

    #[test]
    fn wrong_gradient_is_reported() {
        init_logger();
        let problem = Rosenbrock {
            gradient_error: 1.0,
            ..Rosenbrock::default()
        };
        let session = Session::new(&problem).expect("consistent structures");

        let report =
            check_gradient_unobserved(&session, &X, &Config::default()).expect("gradient check");

        assert_eq!(report.mismatches.len(), 1);
        assert_eq!((report.mismatches[0].row, report.mismatches[0].col), (0, 0));
        assert!(report.mismatches[0].in_pattern);
    }

    #[test]
    fn wrong_jacobian_value_is_reported() {
        let problem = Rosenbrock {
            jacobian_error: 0.5,
            ..Rosenbrock::default()
        };
        let session = Session::new(&problem).expect("consistent structures");

        let report =
            check_jacobian_unobserved(&session, &X, &Config::default()).expect("jacobian check");

        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].col, 1);
    }

    #[test]
    fn missing_pattern_entry_is_reported() {
        init_logger();
        let problem = Rosenbrock {
            declared_nnz_h: 2,
            drop_hessian_offdiagonal: true,
            ..Rosenbrock::default()
        };
        let session = Session::new(&problem).expect("consistent structures");

        let report = check_hessian_unobserved(&session, &X, 1.0, &[0.0], &Config::default())
            .expect("hessian check");

        // The off-diagonal entry is missed from both sides.
        assert_eq!(report.mismatches.len(), 2);
        assert!(report.mismatches.iter().all(|c| !c.in_pattern));
    }

    #[test]
    fn wrong_hessian_value_is_reported() {
        let problem = Rosenbrock {
            hessian_error: 3.0,
            ..Rosenbrock::default()
        };
        let session = Session::new(&problem).expect("consistent structures");

        let report = check_hessian_unobserved(&session, &X, 1.0, &[1.0], &Config::default())
            .expect("hessian check");

        assert_eq!(report.mismatches.len(), 1);
        assert_eq!((report.mismatches[0].row, report.mismatches[0].col), (0, 0));
    }

    #[test]
    fn observer_can_stop_checking() {
        let problem = Rosenbrock::default();
        let session = Session::new(&problem).expect("consistent structures");

        let mut seen = 0usize;
        let observer = |event: &Event<'_>| {
            seen += 1;
            assert_eq!(event.derivative, Derivative::Hessian);
            if seen == 2 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let report = check_hessian(&session, &X, 1.0, &[0.0], &Config::default(), observer)
            .expect("hessian check");

        assert!(report.stopped_early);
        assert_eq!(report.compared, 2);
        assert_eq!(seen, 2);
    }

    #[test]
    fn errors_on_invalid_config() {
        let problem = Rosenbrock::default();
        let session = Session::new(&problem).expect("consistent structures");
        let config = Config {
            rel_tol: f64::NAN,
            ..Config::default()
        };

        let result = check_gradient_unobserved(&session, &X, &config);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn errors_on_short_multipliers() {
        let problem = Rosenbrock::default();
        let session = Session::new(&problem).expect("consistent structures");

        let result = check_hessian_unobserved(&session, &X, 1.0, &[], &Config::default());
        assert!(matches!(result, Err(Error::Problem(_))));
    }

    #[test]
    fn errors_when_problem_rejects_point() {
        let problem = Rosenbrock::default();
        let session = Session::new(&problem).expect("consistent structures");

        let result = check_gradient_unobserved(&session, &[1.0; 3], &Config::default());
        assert!(matches!(result, Err(Error::Problem(_))));
    }
}
