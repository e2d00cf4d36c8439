//! Discretized PDE-constrained boundary-control problems.
//!
//! Each problem implements [`bcontrol_core::NlpProblem`] so that a
//! large-scale nonlinear optimizer can drive it through the standard
//! callback protocol.
//!
//! # Problems
//!
//! - [`dirichlet`]: 3-D elliptic boundary control with Dirichlet conditions,
//!   where the boundary values of the state act as the control

pub mod dirichlet;

pub use dirichlet::{BoundaryControl3D, ConfigError, Parameters, Variant};
