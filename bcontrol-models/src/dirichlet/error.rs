use thiserror::Error;

/// Errors detected while configuring a problem instance.
///
/// Configuration is checked once, at construction, so a problem that exists
/// is always ready to evaluate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid needs at least one interior point per dimension, got {n}")]
    GridTooSmall { n: usize },

    #[error("grid with {n} interior points per dimension overflows the index range")]
    GridTooLarge { n: usize },

    #[error("`{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("`{name}` lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds {
        name: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("`{name}` must be a number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("invalid penalty shape: {reason}")]
    InvalidPenalty { reason: &'static str },

    #[error("failed to parse parameters")]
    Parse(#[from] toml::de::Error),
}
