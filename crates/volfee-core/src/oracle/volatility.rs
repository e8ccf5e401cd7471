//! # Realized Volatility Estimator
//!
//! Computes annualized realized volatility from a window of tick
//! observations, classifies it into a regime, and smooths the series with
//! two half-life EMAs. Tick differences approximate log returns in basis
//! points, so no price conversion happens here.

use crate::constants::{
    EMA_HALF_LIFE_30D, EMA_HALF_LIFE_7D, EMA_LN2_SCALED, EMA_WEIGHT_SCALE, MIN_VOL_SAMPLES,
    REGIME_HIGH_MAX_BPS, REGIME_LOW_MAX_BPS, REGIME_NORMAL_MAX_BPS, REGIME_VERY_LOW_MAX_BPS,
    SECONDS_PER_YEAR, VOL_SCALE, VOL_SCALE_SQRT,
};
use crate::errors::{CoreResult, VolfeeCoreError};
use crate::math::safe_math::{safe_add_u128, safe_mul_u128, sqrt_u128};
use crate::oracle::observation::Observation;
use crate::types::market::VolRegime;

/// Per-market volatility state, mutated only by the update orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct VolState {
    /// Annualized realized volatility (basis points)
    pub current_vol_bps: u64,
    /// 7-day half-life EMA of the volatility series (basis points)
    pub ema_7d_bps: u64,
    /// 30-day half-life EMA of the volatility series (basis points)
    pub ema_30d_bps: u64,
    /// Timestamp of the last successful update, `None` if never updated
    pub last_update: Option<u64>,
    /// Regime classification of `current_vol_bps`
    pub regime: VolRegime,
    /// Number of observations in the last update window
    pub sample_count: usize,
}

impl VolState {
    /// Fresh state for a newly registered market
    pub fn new() -> Self {
        Self::default()
    }
}

/// Annualized realized volatility in basis points over an ordered window
///
/// The window must hold at least two observations with non-decreasing
/// timestamps. Consecutive pairs at identical timestamps are skipped;
/// a window where every pair is skipped yields 0. Per-pair variance is
/// accumulated as `delta^2 * VOL_SCALE / dt` so that fractional precision
/// survives the integer division, then the mean per-second variance is
/// annualized and square-rooted back out of the scale.
pub fn compute_realized_vol(observations: &[Observation]) -> CoreResult<u64> {
    if observations.len() < MIN_VOL_SAMPLES {
        return Err(VolfeeCoreError::InsufficientSamples {
            got: observations.len(),
            need: MIN_VOL_SAMPLES,
        });
    }

    let mut sum_scaled_variance = 0u128;
    let mut valid_pairs = 0u128;

    for pair in observations.windows(2) {
        // An out-of-order pair collapses to dt == 0 and is skipped like a
        // same-second pair; callers feed insertion-ordered windows.
        let dt = pair[1].timestamp.saturating_sub(pair[0].timestamp);
        if dt == 0 {
            continue;
        }

        let delta = pair[1].tick as i128 - pair[0].tick as i128;
        let delta_squared = (delta * delta) as u128;

        let scaled = safe_mul_u128(delta_squared, VOL_SCALE)?;
        sum_scaled_variance = safe_add_u128(sum_scaled_variance, scaled / dt as u128)?;
        valid_pairs += 1;
    }

    if valid_pairs == 0 {
        return Ok(0);
    }

    let mean_variance_per_second = sum_scaled_variance / valid_pairs;
    let annual_variance = safe_mul_u128(mean_variance_per_second, SECONDS_PER_YEAR as u128)?;

    // sqrt of the 1e18-scaled variance carries a residual 1e9 scale
    Ok((sqrt_u128(annual_variance) / VOL_SCALE_SQRT) as u64)
}

/// Classify annualized volatility into a regime
///
/// Boundary values fall into the lower regime: exactly 2000 bps is still
/// VeryLow.
pub fn classify_regime(vol_bps: u64) -> VolRegime {
    if vol_bps <= REGIME_VERY_LOW_MAX_BPS {
        VolRegime::VeryLow
    } else if vol_bps <= REGIME_LOW_MAX_BPS {
        VolRegime::Low
    } else if vol_bps <= REGIME_NORMAL_MAX_BPS {
        VolRegime::Normal
    } else if vol_bps <= REGIME_HIGH_MAX_BPS {
        VolRegime::High
    } else {
        VolRegime::Extreme
    }
}

/// Advance an EMA by `elapsed_secs` toward `new_value`
///
/// Approximates continuous exponential decay `1 - 0.5^(elapsed/half_life)`
/// with a saturating linear weight `elapsed * ln(2) / half_life` in
/// parts-per-thousand. A zero `current` seeds the EMA with `new_value`
/// directly; zero elapsed time leaves it untouched.
pub fn update_ema(current: u64, new_value: u64, elapsed_secs: u64, half_life_secs: u64) -> u64 {
    if current == 0 {
        return new_value;
    }
    if elapsed_secs == 0 {
        return current;
    }

    let weight = ((elapsed_secs as u128 * EMA_LN2_SCALED as u128) / half_life_secs as u128)
        .min(EMA_WEIGHT_SCALE as u128);
    let retained = EMA_WEIGHT_SCALE as u128 - weight;

    ((retained * current as u128 + weight * new_value as u128) / EMA_WEIGHT_SCALE as u128) as u64
}

/// True when current volatility sits well above its long-horizon average
/// (`current > 1.5 * ema30`)
pub fn is_elevated(state: &VolState) -> bool {
    state.current_vol_bps as u128 * 2 > state.ema_30d_bps as u128 * 3
}

/// True when current volatility sits well below its long-horizon average
/// (`current < 0.5 * ema30`)
pub fn is_depressed(state: &VolState) -> bool {
    state.current_vol_bps as u128 * 2 < state.ema_30d_bps as u128
}

/// Recompute a market's volatility state from an observation window
///
/// Computes the fresh realized volatility first, so a failed computation
/// leaves the state untouched. On the very first update both EMAs seed to
/// the freshly computed volatility.
pub fn update_vol_state(
    state: &mut VolState,
    observations: &[Observation],
    now: u64,
) -> CoreResult<()> {
    let vol_bps = compute_realized_vol(observations)?;
    let elapsed = state
        .last_update
        .map_or(0, |last| now.saturating_sub(last));

    state.current_vol_bps = vol_bps;
    state.regime = classify_regime(vol_bps);
    state.ema_7d_bps = update_ema(state.ema_7d_bps, vol_bps, elapsed, EMA_HALF_LIFE_7D);
    state.ema_30d_bps = update_ema(state.ema_30d_bps, vol_bps, elapsed, EMA_HALF_LIFE_30D);
    state.last_update = Some(now);
    state.sample_count = observations.len();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(ticks: &[i32], timestamps: &[u64]) -> Vec<Observation> {
        ticks
            .iter()
            .zip(timestamps)
            .map(|(&tick, &timestamp)| Observation { tick, timestamp })
            .collect()
    }

    #[test]
    fn test_insufficient_samples() {
        assert!(matches!(
            compute_realized_vol(&[]),
            Err(VolfeeCoreError::InsufficientSamples { got: 0, need: 2 })
        ));
        assert!(compute_realized_vol(&obs(&[1], &[1])).is_err());
    }

    #[test]
    fn test_constant_price_is_zero_vol() {
        let window = obs(&[500, 500, 500], &[0, 60, 120]);
        assert_eq!(compute_realized_vol(&window).unwrap(), 0);
    }

    #[test]
    fn test_all_zero_dt_pairs_yield_zero() {
        let window = obs(&[0, 100, 200], &[50, 50, 50]);
        assert_eq!(compute_realized_vol(&window).unwrap(), 0);
    }

    #[test]
    fn test_zero_dt_pairs_are_skipped_not_counted() {
        // The middle pair shares a timestamp and must not dilute the mean
        let with_dup = obs(&[0, 10, 10, 20], &[0, 15, 15, 30]);
        let without_dup = obs(&[0, 10, 20], &[0, 15, 30]);
        assert_eq!(
            compute_realized_vol(&with_dup).unwrap(),
            compute_realized_vol(&without_dup).unwrap()
        );
    }

    #[test]
    fn test_steady_drift_is_high_vol() {
        // 10 ticks per 15s of constant drift annualizes to extreme vol
        let window = obs(&[0, 10, 20, 30, 40], &[0, 15, 30, 45, 60]);
        let vol = compute_realized_vol(&window).unwrap();
        assert!(vol > 10_000, "expected extreme annualized vol, got {vol}");
    }

    #[test]
    fn test_regime_boundaries_fall_low() {
        assert_eq!(classify_regime(0), VolRegime::VeryLow);
        assert_eq!(classify_regime(2_000), VolRegime::VeryLow);
        assert_eq!(classify_regime(2_001), VolRegime::Low);
        assert_eq!(classify_regime(3_500), VolRegime::Low);
        assert_eq!(classify_regime(3_501), VolRegime::Normal);
        assert_eq!(classify_regime(5_000), VolRegime::Normal);
        assert_eq!(classify_regime(5_001), VolRegime::High);
        assert_eq!(classify_regime(7_500), VolRegime::High);
        assert_eq!(classify_regime(7_501), VolRegime::Extreme);
        assert_eq!(classify_regime(u64::MAX), VolRegime::Extreme);
    }

    #[test]
    fn test_ema_seed_and_zero_elapsed() {
        assert_eq!(update_ema(0, 4_000, 3_600, EMA_HALF_LIFE_7D), 4_000);
        assert_eq!(update_ema(2_000, 4_000, 0, EMA_HALF_LIFE_7D), 2_000);
    }

    #[test]
    fn test_ema_converges_toward_new_value() {
        let mut ema = 2_000u64;
        for _ in 0..200 {
            let next = update_ema(ema, 4_000, EMA_HALF_LIFE_7D, EMA_HALF_LIFE_7D);
            assert!(next >= ema);
            ema = next;
        }
        // weight saturates well below full replacement at one half-life,
        // but repeated application must close most of the gap
        assert!(ema > 3_900);
    }

    #[test]
    fn test_ema_weight_saturates() {
        // Elapsed far beyond the half-life clamps the weight to 1.0
        assert_eq!(update_ema(2_000, 4_000, u64::MAX / 1_000, EMA_HALF_LIFE_7D), 4_000);
    }

    #[test]
    fn test_first_update_seeds_both_emas() {
        let mut state = VolState::new();
        let window = obs(&[0, 10, 20, 30, 40], &[0, 15, 30, 45, 60]);
        update_vol_state(&mut state, &window, 60).unwrap();

        assert!(state.current_vol_bps > 0);
        assert_eq!(state.ema_7d_bps, state.current_vol_bps);
        assert_eq!(state.ema_30d_bps, state.current_vol_bps);
        assert_eq!(state.last_update, Some(60));
        assert_eq!(state.sample_count, 5);
        assert_eq!(state.regime, VolRegime::Extreme);
    }

    #[test]
    fn test_second_update_smooths() {
        let mut state = VolState::new();
        let noisy = obs(&[0, 10, 20, 30, 40], &[0, 15, 30, 45, 60]);
        update_vol_state(&mut state, &noisy, 60).unwrap();
        let first_vol = state.current_vol_bps;

        let calm = obs(&[40, 40, 40], &[60, 120, 180]);
        update_vol_state(&mut state, &calm, 3_600).unwrap();

        assert_eq!(state.current_vol_bps, 0);
        assert_eq!(state.regime, VolRegime::VeryLow);
        // EMAs decay toward zero but retain most of the first reading
        assert!(state.ema_7d_bps > 0 && state.ema_7d_bps < first_vol);
        assert!(state.ema_30d_bps > state.ema_7d_bps);
    }

    #[test]
    fn test_failed_computation_leaves_state_untouched() {
        let mut state = VolState::new();
        let window = obs(&[0, 10, 20, 30, 40], &[0, 15, 30, 45, 60]);
        update_vol_state(&mut state, &window, 60).unwrap();
        let before = state.clone();

        let too_small = obs(&[0], &[0]);
        assert!(update_vol_state(&mut state, &too_small, 120).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_elevated_and_depressed() {
        let mut state = VolState {
            current_vol_bps: 4_000,
            ema_30d_bps: 2_000,
            ..VolState::default()
        };
        assert!(is_elevated(&state));
        assert!(!is_depressed(&state));

        state.current_vol_bps = 999;
        assert!(!is_elevated(&state));
        assert!(is_depressed(&state));

        // Exactly 1.5x is not elevated, exactly 0.5x is not depressed
        state.current_vol_bps = 3_000;
        assert!(!is_elevated(&state));
        state.current_vol_bps = 1_000;
        assert!(!is_depressed(&state));
    }
}
