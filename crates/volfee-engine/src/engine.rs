//! # Update Orchestration
//!
//! Per-market registry tying the observation buffer, volatility state and
//! fee curve together, with the rate-limited update policy and the keeper
//! incentive. The host calls `on_trade` on every trade and `quote_fee`
//! immediately before executing one; any external party may call
//! `trigger_update` and earn the incentive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::governance::Governance;
use crate::incentive::IncentiveVault;
use volfee_core::oracle::{
    is_depressed, is_elevated, update_vol_state, ObservationBuffer, VolState,
};
use volfee_core::types::{recommended_range, FeeConfig, TickRange};
use volfee_core::{AccountId, MarketId, VolRegime, MIN_VOL_SAMPLES, UPDATE_WINDOW};

/// Everything the engine tracks for one market
#[derive(Debug, Clone)]
struct Market {
    buffer: ObservationBuffer,
    vol_state: VolState,
    fee_config: FeeConfig,
}

impl Market {
    fn new(initial_tick: i32, timestamp: u64) -> Self {
        let mut buffer = ObservationBuffer::new();
        buffer.record(initial_tick, timestamp);
        Self {
            buffer,
            vol_state: VolState::new(),
            fee_config: FeeConfig::default(),
        }
    }
}

/// Result of a successful volatility update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub vol_bps: u64,
    pub regime: VolRegime,
    pub fee_bps: u64,
    pub sample_count: usize,
}

/// Read-only view of a market for downstream consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolSnapshot {
    pub current_vol_bps: u64,
    pub ema_7d_bps: u64,
    pub ema_30d_bps: u64,
    pub regime: VolRegime,
    pub last_update: Option<u64>,
    pub sample_count: usize,
    pub fee_bps: u64,
    pub observation_count: usize,
}

/// The dynamic fee engine
pub struct Engine {
    config: EngineConfig,
    governance: Governance,
    vault: IncentiveVault,
    markets: HashMap<MarketId, Market>,
}

impl Engine {
    /// Build an engine with a validated configuration and initial governor
    pub fn new(config: EngineConfig, governor: AccountId) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            governance: Governance::new(governor),
            vault: IncentiveVault::new(),
            markets: HashMap::new(),
        })
    }

    // ========================================================================
    // Host Interface
    // ========================================================================

    /// Register a market, seed its buffer with one observation and install
    /// the default fee curve
    pub fn on_market_created(
        &mut self,
        market_id: MarketId,
        initial_tick: i32,
        timestamp: u64,
    ) -> EngineResult<()> {
        if self.markets.contains_key(&market_id) {
            return Err(EngineError::MarketAlreadyInitialized);
        }
        self.markets
            .insert(market_id, Market::new(initial_tick, timestamp));
        info!(%market_id, initial_tick, timestamp, "market registered");
        Ok(())
    }

    /// Record one trade observation
    pub fn on_trade(&mut self, market_id: MarketId, tick: i32, timestamp: u64) -> EngineResult<()> {
        let market = self.market_mut(market_id)?;
        market.buffer.record(tick, timestamp);
        Ok(())
    }

    /// Fee in basis points for the next trade
    ///
    /// Before the first volatility update this is the configured default;
    /// afterwards it follows the market's fee curve at the stored
    /// volatility.
    pub fn quote_fee(&self, market_id: MarketId) -> EngineResult<u64> {
        let market = self.market(market_id)?;
        if market.vol_state.last_update.is_none() {
            return Ok(self.config.default_fee_bps);
        }
        Ok(market
            .fee_config
            .fee_for_volatility(market.vol_state.current_vol_bps))
    }

    // ========================================================================
    // Keeper Interface
    // ========================================================================

    /// Recompute a market's volatility and fee, paying `caller` the
    /// configured incentive
    ///
    /// Gated on registration, the minimum update interval, and a minimum
    /// sample count; every gate is checked before any state is written.
    /// The volatility state commits before the incentive payment, so a
    /// payment failure surfaces as an error while the update itself
    /// remains in effect.
    pub fn trigger_update(
        &mut self,
        market_id: MarketId,
        caller: AccountId,
        now: u64,
    ) -> EngineResult<UpdateOutcome> {
        let min_interval = self.config.min_update_interval_secs;
        let incentive = self.config.incentive_amount;

        let market = self
            .markets
            .get_mut(&market_id)
            .ok_or(EngineError::MarketNotInitialized)?;

        if let Some(last_update) = market.vol_state.last_update {
            let elapsed = now.saturating_sub(last_update);
            if elapsed < min_interval {
                return Err(EngineError::UpdateTooFrequent {
                    wait_secs: min_interval - elapsed,
                });
            }
        }

        let available = market.buffer.len();
        if available < MIN_VOL_SAMPLES {
            return Err(EngineError::InsufficientObservations {
                got: available,
                need: MIN_VOL_SAMPLES,
            });
        }

        let window = market.buffer.tail(UPDATE_WINDOW);
        update_vol_state(&mut market.vol_state, &window, now)?;

        let outcome = UpdateOutcome {
            vol_bps: market.vol_state.current_vol_bps,
            regime: market.vol_state.regime,
            fee_bps: market
                .fee_config
                .fee_for_volatility(market.vol_state.current_vol_bps),
            sample_count: market.vol_state.sample_count,
        };
        debug!(
            %market_id,
            vol_bps = outcome.vol_bps,
            regime = ?outcome.regime,
            fee_bps = outcome.fee_bps,
            samples = outcome.sample_count,
            "volatility updated"
        );

        // Payment is sequenced after the state commit; a failure here does
        // not roll the update back
        if let Err(err) = self.vault.pay(caller, incentive) {
            warn!(%market_id, %caller, "incentive payment failed: {err}");
            return Err(err);
        }

        Ok(outcome)
    }

    // ========================================================================
    // Governance Interface
    // ========================================================================

    /// Replace a market's fee curve; the candidate is validated before the
    /// active configuration is touched
    pub fn set_fee_config(
        &mut self,
        caller: AccountId,
        market_id: MarketId,
        fee_config: FeeConfig,
    ) -> EngineResult<()> {
        self.governance.require_governor(caller)?;
        fee_config.validate()?;
        let market = self.market_mut(market_id)?;
        market.fee_config = fee_config;
        info!(%market_id, "fee configuration replaced");
        Ok(())
    }

    pub fn set_incentive_amount(&mut self, caller: AccountId, amount: u64) -> EngineResult<()> {
        self.governance.require_governor(caller)?;
        self.config.incentive_amount = amount;
        info!(amount, "incentive amount changed");
        Ok(())
    }

    pub fn set_min_update_interval(&mut self, caller: AccountId, secs: u64) -> EngineResult<()> {
        self.governance.require_governor(caller)?;
        if secs == 0 {
            return Err(EngineError::InvalidConfig(
                "min_update_interval_secs must be greater than 0".to_string(),
            ));
        }
        self.config.min_update_interval_secs = secs;
        info!(secs, "minimum update interval changed");
        Ok(())
    }

    pub fn transfer_governance(
        &mut self,
        caller: AccountId,
        new_governor: AccountId,
    ) -> EngineResult<()> {
        self.governance.transfer(caller, new_governor)?;
        info!(%new_governor, "governance transferred");
        Ok(())
    }

    pub fn governor(&self) -> AccountId {
        self.governance.governor()
    }

    // ========================================================================
    // Incentive Interface
    // ========================================================================

    /// Deposit into the incentive vault; open to anyone
    pub fn fund_incentives(&mut self, amount: u64) {
        self.vault.fund(amount);
    }

    pub fn incentive_balance(&self) -> u64 {
        self.vault.balance()
    }

    pub fn accrued_incentives(&self, caller: AccountId) -> u64 {
        self.vault.accrued_of(caller)
    }

    /// Withdraw the caller's accrued incentive payments
    pub fn claim_incentives(&mut self, caller: AccountId) -> u64 {
        self.vault.claim(caller)
    }

    // ========================================================================
    // Query Interface
    // ========================================================================

    pub fn is_initialized(&self, market_id: MarketId) -> bool {
        self.markets.contains_key(&market_id)
    }

    pub fn observation_count(&self, market_id: MarketId) -> EngineResult<usize> {
        Ok(self.market(market_id)?.buffer.len())
    }

    /// Volatility state, current fee and observation count in one view
    pub fn vol_snapshot(&self, market_id: MarketId) -> EngineResult<VolSnapshot> {
        let market = self.market(market_id)?;
        Ok(VolSnapshot {
            current_vol_bps: market.vol_state.current_vol_bps,
            ema_7d_bps: market.vol_state.ema_7d_bps,
            ema_30d_bps: market.vol_state.ema_30d_bps,
            regime: market.vol_state.regime,
            last_update: market.vol_state.last_update,
            sample_count: market.vol_state.sample_count,
            fee_bps: self.quote_fee(market_id)?,
            observation_count: market.buffer.len(),
        })
    }

    /// Recommended liquidity range around `tick` for the market's regime
    pub fn recommended_range(&self, market_id: MarketId, tick: i32) -> EngineResult<TickRange> {
        let market = self.market(market_id)?;
        Ok(recommended_range(tick, market.vol_state.regime))
    }

    /// True when current volatility runs well above its 30-day average
    pub fn is_elevated(&self, market_id: MarketId) -> EngineResult<bool> {
        Ok(is_elevated(&self.market(market_id)?.vol_state))
    }

    /// True when current volatility runs well below its 30-day average
    pub fn is_depressed(&self, market_id: MarketId) -> EngineResult<bool> {
        Ok(is_depressed(&self.market(market_id)?.vol_state))
    }

    fn market(&self, market_id: MarketId) -> EngineResult<&Market> {
        self.markets
            .get(&market_id)
            .ok_or(EngineError::MarketNotInitialized)
    }

    fn market_mut(&mut self, market_id: MarketId) -> EngineResult<&mut Market> {
        self.markets
            .get_mut(&market_id)
            .ok_or(EngineError::MarketNotInitialized)
    }
}
