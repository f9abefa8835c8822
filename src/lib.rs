//! NeoIWL: neonatal insensible water loss calculator
//!
//! Raw weight text + factor toggles → Validator → CalculationEngine →
//! ReactiveController → snapshot for the presentation layer.

pub mod core;
pub mod types;

// =============================================================================
// WEIGHT LIMITS [C] - grams
// =============================================================================

/// Weights at or below this are rejected as TooLow
pub const MIN_WEIGHT_GRAMS: f64 = 200.0;

/// Weights above this are rejected as TooHigh (10000 itself is valid)
pub const MAX_WEIGHT_GRAMS: f64 = 10_000.0;

// =============================================================================
// BASELINE RATES [C] - mL/kg/day, by weight band
// =============================================================================

pub const BASELINE_RATE_UNDER_750: f64 = 150.0;
pub const BASELINE_RATE_750_1000: f64 = 65.0;
pub const BASELINE_RATE_1001_1250: f64 = 55.0;
pub const BASELINE_RATE_1251_1500: f64 = 35.0;
pub const BASELINE_RATE_1501_2000: f64 = 25.0;
pub const BASELINE_RATE_OVER_2000: f64 = 17.5;

// =============================================================================
// ENVIRONMENTAL FACTORS [C]
// =============================================================================

/// Radiant warmer multiplier (+75%)
pub const RADIANT_WARMER_MULTIPLIER: f64 = 1.75;

/// Fever multiplier (+40%)
pub const FEVER_MULTIPLIER: f64 = 1.40;

/// Humidified incubator multiplier (-25%)
pub const HUMIDIFIED_ENV_MULTIPLIER: f64 = 0.75;

/// Phototherapy addition (mL/kg/day)
pub const PHOTOTHERAPY_ADDITION: f64 = 15.0;

/// Phototherapy only adds water loss at or below this weight
pub const PHOTOTHERAPY_MAX_WEIGHT_GRAMS: f64 = 2000.0;

// =============================================================================
// CONTROLLER [C]
// =============================================================================

/// Trailing-edge debounce for weight text entry (milliseconds)
pub const DEBOUNCE_DELAY_MS: u64 = 300;

/// Capacity of the snapshot broadcast channel
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
