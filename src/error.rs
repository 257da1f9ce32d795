//! Error types shared by the simulation core.

use crate::vector::VectorError;
use thiserror::Error;

/// Errors raised by population construction and ticking
#[derive(Debug, Error)]
pub enum SimError {
    /// A vector fault aborted the current tick
    #[error("vector fault: {0}")]
    Vector(#[from] VectorError),
    /// Rejected construction parameters
    #[error("invalid parameter: {0}")]
    Invalid(String),
}

pub type SimResult<T> = Result<T, SimError>;
