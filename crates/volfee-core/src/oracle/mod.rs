//! # Oracle Module
//!
//! Observation storage and realized volatility estimation. The buffer
//! records raw (tick, timestamp) pairs on every trade; the estimator
//! turns a window of them into annualized volatility and regime state.

pub mod observation;
pub mod volatility;

pub use observation::*;
pub use volatility::*;
