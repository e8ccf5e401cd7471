//! # Market Types
//!
//! Identifiers, volatility regimes and the regime-driven liquidity range
//! recommendation.

use crate::constants::{
    MAX_TICK, MIN_TICK, RANGE_HALF_WIDTH_EXTREME, RANGE_HALF_WIDTH_HIGH, RANGE_HALF_WIDTH_LOW,
    RANGE_HALF_WIDTH_NORMAL, RANGE_HALF_WIDTH_VERY_LOW,
};

/// Opaque per-market identifier assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketId(pub u64);

impl std::fmt::Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "market-{}", self.0)
    }
}

/// Identity of a caller (governor, keeper, host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account-{}", self.0)
    }
}

/// Discrete volatility bucket driving fee and range policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum VolRegime {
    #[default]
    VeryLow,
    Low,
    Normal,
    High,
    Extreme,
}

impl VolRegime {
    /// Half-width in ticks of the recommended liquidity range
    ///
    /// Wider ranges in turbulent regimes trade capital efficiency for
    /// less frequent rebalancing.
    pub fn range_half_width(self) -> i32 {
        match self {
            VolRegime::VeryLow => RANGE_HALF_WIDTH_VERY_LOW,
            VolRegime::Low => RANGE_HALF_WIDTH_LOW,
            VolRegime::Normal => RANGE_HALF_WIDTH_NORMAL,
            VolRegime::High => RANGE_HALF_WIDTH_HIGH,
            VolRegime::Extreme => RANGE_HALF_WIDTH_EXTREME,
        }
    }
}

/// An inclusive tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

/// Recommended liquidity range centered on `tick` for the given regime,
/// clamped to the representable tick bounds
pub fn recommended_range(tick: i32, regime: VolRegime) -> TickRange {
    let half_width = regime.range_half_width();
    TickRange {
        lower: tick.saturating_sub(half_width).max(MIN_TICK),
        upper: tick.saturating_add(half_width).min(MAX_TICK),
    }
}
