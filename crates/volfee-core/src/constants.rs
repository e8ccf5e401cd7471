//! # Protocol Constants
//!
//! Fundamental constants for the volatility and fee engine including:
//! - Fixed-point scales and basis-point denominators
//! - Observation buffer and update window sizes
//! - Regime classification thresholds
//! - EMA half-lives and weight scales
//! - Fee curve and update policy defaults
//! - Tick bounds and liquidity range widths

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Fixed-point scale applied to per-pair variance terms (10^18)
pub const VOL_SCALE: u128 = 1_000_000_000_000_000_000;

/// Square root of `VOL_SCALE` (10^9), divided out after the final sqrt
pub const VOL_SCALE_SQRT: u128 = 1_000_000_000;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds per year at 365.25 days, used for annualization
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

// ============================================================================
// Observation Buffer Constants
// ============================================================================

/// Fixed capacity of the per-market observation ring buffer
pub const OBSERVATION_CAPACITY: usize = 1024;

/// Maximum number of recent observations fed to one volatility computation
pub const UPDATE_WINDOW: usize = 256;

/// Minimum observations required to estimate volatility
pub const MIN_VOL_SAMPLES: usize = 2;

// ============================================================================
// Regime Classification Thresholds (annualized vol, basis points)
// ============================================================================

/// Upper bound of the VeryLow regime (inclusive)
pub const REGIME_VERY_LOW_MAX_BPS: u64 = 2_000;

/// Upper bound of the Low regime (inclusive)
pub const REGIME_LOW_MAX_BPS: u64 = 3_500;

/// Upper bound of the Normal regime (inclusive)
pub const REGIME_NORMAL_MAX_BPS: u64 = 5_000;

/// Upper bound of the High regime (inclusive); above is Extreme
pub const REGIME_HIGH_MAX_BPS: u64 = 7_500;

// ============================================================================
// EMA Constants
// ============================================================================

/// Short EMA half-life (7 days)
pub const EMA_HALF_LIFE_7D: u64 = 604_800;

/// Long EMA half-life (30 days)
pub const EMA_HALF_LIFE_30D: u64 = 2_592_000;

/// EMA weight denominator (1000 = parts-per-thousand, i.e. weight 1.0)
pub const EMA_WEIGHT_SCALE: u64 = 1_000;

/// ln(2) scaled by `EMA_WEIGHT_SCALE`
pub const EMA_LN2_SCALED: u64 = 693;

// ============================================================================
// Fee and Update Policy Defaults
// ============================================================================

/// Number of control points on the volatility-to-fee curve
pub const FEE_CONTROL_POINTS: usize = 6;

/// Fee quoted before the first volatility update (0.3%)
pub const DEFAULT_FEE_BPS: u64 = 30;

/// Default minimum time between volatility updates (seconds)
pub const DEFAULT_MIN_UPDATE_INTERVAL: u64 = 300;

// ============================================================================
// Tick Bounds and Liquidity Range Widths
// ============================================================================

/// Minimum representable price tick
pub const MIN_TICK: i32 = -887_272;

/// Maximum representable price tick
pub const MAX_TICK: i32 = 887_272;

/// Recommended range half-width per regime, in ticks
pub const RANGE_HALF_WIDTH_VERY_LOW: i32 = 200;
pub const RANGE_HALF_WIDTH_LOW: i32 = 500;
pub const RANGE_HALF_WIDTH_NORMAL: i32 = 1_000;
pub const RANGE_HALF_WIDTH_HIGH: i32 = 2_000;
pub const RANGE_HALF_WIDTH_EXTREME: i32 = 4_000;
