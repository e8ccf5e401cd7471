//! # Volfee Core - Volatility and Fee Math
//!
//! This crate contains the pure computational core of the Volfee dynamic
//! fee engine, shared between the engine crate and any off-chain consumer:
//!
//! - A fixed-capacity price-tick observation ring buffer
//! - Realized volatility estimation with EMA smoothing and regime buckets
//! - Piecewise-linear volatility-to-fee curve evaluation
//! - Overflow-checked arithmetic helpers
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain use

// Re-export all modules
pub mod constants;
pub mod errors;
pub mod math;
pub mod oracle;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreResult, VolfeeCoreError};
pub use oracle::*;
pub use types::*;
