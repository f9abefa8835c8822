//! Weight band definitions

use serde::{Deserialize, Serialize};

/// One row of the baseline table: a weight range and its baseline IWL rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBand {
    /// Lower edge in whole grams (inclusive)
    pub min_grams: f64,
    /// Upper edge in grams (inclusive), None for the open-ended last band
    pub max_grams: Option<f64>,
    /// Baseline rate (mL/kg/day)
    pub baseline_rate: f64,
    /// Display label, e.g. "1001-1250 g"
    pub label: String,
}

impl WeightBand {
    /// Create a bounded band
    pub fn bounded(min_grams: f64, max_grams: f64, baseline_rate: f64) -> Self {
        Self {
            min_grams,
            max_grams: Some(max_grams),
            baseline_rate,
            label: format!("{}-{} g", min_grams, max_grams),
        }
    }

    /// Create the open-ended band
    pub fn unbounded(min_grams: f64, baseline_rate: f64) -> Self {
        Self {
            min_grams,
            max_grams: None,
            baseline_rate,
            label: format!(">= {} g", min_grams),
        }
    }

    /// Weight is at or below this band's upper edge
    pub fn within_upper(&self, weight_grams: f64) -> bool {
        self.max_grams.map_or(true, |max| weight_grams <= max)
    }

    /// Is this the open-ended band?
    pub fn is_unbounded(&self) -> bool {
        self.max_grams.is_none()
    }
}

impl std::fmt::Display for WeightBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} mL/kg/day", self.label, self.baseline_rate)
    }
}
