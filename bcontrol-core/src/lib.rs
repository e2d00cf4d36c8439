//! Core traits and types for the bcontrol framework.
//!
//! This crate defines the callback protocol through which a large-scale
//! nonlinear optimizer drives a discretized model:
//!
//! - [`NlpProblem`]: sizes, bounds, starting point, and the evaluation
//!   callbacks for the objective, constraints, and their derivatives
//! - [`SparsityPattern`]: the fixed `(row, col)` structure of a sparse
//!   derivative, established once and reused for every values call
//! - [`Bounds`], [`StartingPoint`], [`Scaling`]: problem data handed to the
//!   solver before its first iteration
//! - [`Solution`]: the final point and multipliers passed to
//!   [`NlpProblem::finalize`] once the solver stops

mod bounds;
mod error;
mod info;
mod problem;
mod scaling;
mod solution;
mod sparsity;
mod start;

pub use bounds::Bounds;
pub use error::{EvalError, check_len};
pub use info::{IndexStyle, NlpInfo};
pub use problem::NlpProblem;
pub use scaling::Scaling;
pub use solution::{Solution, SolverReturn};
pub use sparsity::{Entry, SparsityPattern};
pub use start::StartingPoint;
