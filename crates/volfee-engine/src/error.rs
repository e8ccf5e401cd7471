//! Error types for the engine layer
//!
//! Policy violations are distinct from computation errors so callers can
//! tell "try later" from "not allowed" from a genuine math failure.

use thiserror::Error;
use volfee_core::VolfeeCoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Market not initialized")]
    MarketNotInitialized,

    #[error("Market already initialized")]
    MarketAlreadyInitialized,

    #[error("Update too frequent: retry in {wait_secs}s")]
    UpdateTooFrequent { wait_secs: u64 },

    #[error("Insufficient observations: have {got}, need {need}")]
    InsufficientObservations { got: usize, need: usize },

    #[error("Caller is not the governor")]
    Unauthorized,

    #[error("Incentive payment unavailable: need {needed}, vault holds {available}")]
    IncentiveUnavailable { needed: u64, available: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] VolfeeCoreError),
}

/// Result type using engine errors
pub type EngineResult<T> = Result<T, EngineError>;
