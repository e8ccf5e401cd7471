//! # Volfee Engine - Update Orchestration and Policy
//!
//! The stateful layer over [`volfee_core`]: a per-market registry of
//! observation buffers, volatility state and fee curves, the rate-limited
//! update policy, governance access control, and the keeper incentive
//! vault. All operations are synchronous; the host serializes writers per
//! market and supplies every timestamp.

pub mod config;
pub mod engine;
pub mod error;
pub mod governance;
pub mod incentive;

pub use config::EngineConfig;
pub use engine::{Engine, UpdateOutcome, VolSnapshot};
pub use error::{EngineError, EngineResult};
pub use governance::Governance;
pub use incentive::IncentiveVault;
