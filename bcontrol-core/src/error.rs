use thiserror::Error;

/// Errors that can occur when a solver calls into a problem.
///
/// A correctly configured problem is total over its declared domain, so
/// these only arise from a caller handing over buffers of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A slice argument does not have the length the problem declared.
    #[error("`{what}` has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A values call received a pattern other than the one the problem
    /// reported from its structure query.
    #[error("sparsity pattern has {actual} entries, expected {expected}")]
    PatternMismatch { expected: usize, actual: usize },

    /// A values call received a pattern whose matrix shape differs from
    /// the one the problem reported.
    #[error("sparsity pattern has shape {actual:?}, expected {expected:?}")]
    PatternShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Checks that a slice argument has the declared length.
///
/// # Errors
///
/// Returns [`EvalError::DimensionMismatch`] naming `what` if the lengths differ.
pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), EvalError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvalError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}
