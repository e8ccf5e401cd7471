//! # Core Error Types
//!
//! Input-validation and arithmetic errors for the volatility and fee math.
//! Every error is raised before any state is mutated.

use thiserror::Error;

/// Core computation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum VolfeeCoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Observation buffer is empty")]
    BufferEmpty,

    #[error("Index out of range: {index} with length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Insufficient samples: {got} (need at least {need})")]
    InsufficientSamples { got: usize, need: usize },

    #[error("Invalid fee configuration: control point volatilities must be strictly increasing")]
    InvalidFeeConfig,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, VolfeeCoreError>;
