//! Engine policy configuration
//!
//! Loaded from TOML by the host, validated before the engine is built.
//! Every field has a documented default so an empty file is a valid
//! configuration.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use volfee_core::{BPS_DENOMINATOR, DEFAULT_FEE_BPS, DEFAULT_MIN_UPDATE_INTERVAL};

/// Update policy and incentive parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Minimum seconds between volatility updates for one market
    #[serde(default = "default_min_update_interval")]
    pub min_update_interval_secs: u64,

    /// Fixed payment to the caller of a successful update
    #[serde(default)]
    pub incentive_amount: u64,

    /// Fee quoted before a market's first volatility update (basis points)
    #[serde(default = "default_fee_bps")]
    pub default_fee_bps: u64,
}

fn default_min_update_interval() -> u64 {
    DEFAULT_MIN_UPDATE_INTERVAL
}

fn default_fee_bps() -> u64 {
    DEFAULT_FEE_BPS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_update_interval_secs: DEFAULT_MIN_UPDATE_INTERVAL,
            incentive_amount: 0,
            default_fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> EngineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("failed to read config file {path}: {e}"))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| EngineError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> EngineResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidConfig(format!("failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| {
            EngineError::InvalidConfig(format!("failed to write config file {path}: {e}"))
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_update_interval_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "min_update_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.default_fee_bps > BPS_DENOMINATOR {
            return Err(EngineError::InvalidConfig(format!(
                "default_fee_bps {} exceeds 100% ({})",
                self.default_fee_bps, BPS_DENOMINATOR
            )));
        }

        Ok(())
    }
}
