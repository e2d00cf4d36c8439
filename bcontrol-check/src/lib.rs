//! Verification tools for problems implementing [`bcontrol_core::NlpProblem`].
//!
//! A [`Session`] drives a problem the way a solver does: it queries the
//! dimensions and both sparsity structures once, validates them, and then
//! evaluates values against those fixed structures. The [`derivative`]
//! module compares analytic derivatives against central finite
//! differences through a session.

mod error;
mod observe;
mod session;

pub mod derivative;

pub use error::Error;
pub use observe::Observer;
pub use session::Session;
