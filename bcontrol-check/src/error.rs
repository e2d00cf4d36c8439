use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while validating or checking a problem.
#[derive(Debug, Error)]
pub enum Error {
    #[error("problem callback failed")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("inconsistent {which} structure: {reason}")]
    InconsistentStructure {
        which: &'static str,
        reason: String,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl Error {
    pub(crate) fn problem<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Problem(Box::new(err))
    }

    pub(crate) fn structure(which: &'static str, reason: impl Into<String>) -> Self {
        Self::InconsistentStructure {
            which,
            reason: reason.into(),
        }
    }
}
