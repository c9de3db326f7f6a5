//! Error types for formula evaluation.

use thiserror::Error;

/// Errors that can occur while evaluating physical formulas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhyschemError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Iteration failed to converge: {what}")]
    Convergence { what: &'static str },
}

pub type PhyschemResult<T> = Result<T, PhyschemError>;
