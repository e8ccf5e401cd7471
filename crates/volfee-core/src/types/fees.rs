//! # Fee Curve
//!
//! Governance-configurable piecewise-linear mapping from annualized
//! volatility to a swap fee. Six control points, strictly increasing in
//! volatility; fees interpolate linearly within a segment and clamp to
//! the first and last points outside the configured span.

use crate::constants::FEE_CONTROL_POINTS;
use crate::errors::{CoreResult, VolfeeCoreError};

/// One control point on the volatility-to-fee curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct FeePoint {
    /// Annualized volatility coordinate (basis points)
    pub vol_bps: u64,
    /// Fee charged at this volatility (basis points)
    pub fee_bps: u64,
}

/// Volatility-to-fee curve configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeConfig {
    pub points: [FeePoint; FEE_CONTROL_POINTS],
}

impl Default for FeeConfig {
    /// The built-in curve used before any governance override:
    /// (0,5) (2000,10) (3500,30) (5000,60) (7500,150) (15000,500)
    fn default() -> Self {
        Self {
            points: [
                FeePoint { vol_bps: 0, fee_bps: 5 },
                FeePoint { vol_bps: 2_000, fee_bps: 10 },
                FeePoint { vol_bps: 3_500, fee_bps: 30 },
                FeePoint { vol_bps: 5_000, fee_bps: 60 },
                FeePoint { vol_bps: 7_500, fee_bps: 150 },
                FeePoint { vol_bps: 15_000, fee_bps: 500 },
            ],
        }
    }
}

impl FeeConfig {
    /// Build a validated configuration from raw control points
    pub fn new(points: [FeePoint; FEE_CONTROL_POINTS]) -> CoreResult<Self> {
        let config = Self { points };
        config.validate()?;
        Ok(config)
    }

    /// Control point volatilities must be strictly increasing
    pub fn validate(&self) -> CoreResult<()> {
        if self
            .points
            .windows(2)
            .all(|pair| pair[0].vol_bps < pair[1].vol_bps)
        {
            Ok(())
        } else {
            Err(VolfeeCoreError::InvalidFeeConfig)
        }
    }

    /// Fee in basis points for the given annualized volatility
    ///
    /// Floors at the first point, caps at the last, and interpolates
    /// linearly in between with truncation toward zero. Segments may
    /// slope down as well as up.
    pub fn fee_for_volatility(&self, vol_bps: u64) -> u64 {
        let first = self.points[0];
        let last = self.points[FEE_CONTROL_POINTS - 1];

        if vol_bps <= first.vol_bps {
            return first.fee_bps;
        }
        if vol_bps >= last.vol_bps {
            return last.fee_bps;
        }

        for pair in self.points.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if vol_bps <= upper.vol_bps {
                // Two u64 factors never overflow a u128 product, and the
                // quotient is bounded by |rise|, so the result stays
                // within the segment endpoints
                let offset = (vol_bps - lower.vol_bps) as u128;
                let run = (upper.vol_bps - lower.vol_bps) as u128;
                return if upper.fee_bps >= lower.fee_bps {
                    let rise = (upper.fee_bps - lower.fee_bps) as u128;
                    lower.fee_bps + (rise * offset / run) as u64
                } else {
                    let drop = (lower.fee_bps - upper.fee_bps) as u128;
                    lower.fee_bps - (drop * offset / run) as u64
                };
            }
        }

        // Unreachable: vol_bps < last.vol_bps guarantees a containing segment
        last.fee_bps
    }
}
