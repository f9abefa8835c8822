//! Calculation result and derivation trace

use serde::{Deserialize, Serialize};

/// One step of the derivation, in the order it was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    Baseline {
        band_label: String,
        rate: f64,
    },
    Multiplier {
        label: String,
        magnitude: f64,
        percent_change: f64,
    },
    CombinedMultiplier {
        multiplier: f64,
        baseline: f64,
        adjusted: f64,
    },
    Addition {
        label: String,
        amount: f64,
        before: f64,
        after: f64,
    },
    /// Active but inapplicable at this weight
    AdditionSkipped {
        label: String,
        reason: String,
    },
    Summary {
        per_kg_per_day_rate: f64,
        weight_kg: f64,
        total_ml_per_day: f64,
    },
}

impl std::fmt::Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceStep::Baseline { band_label, rate } => {
                write!(f, "Baseline ({}): {:.2} mL/kg/day", band_label, rate)
            }
            TraceStep::Multiplier { label, magnitude, percent_change } => {
                write!(f, "{}: x{:.2} ({:+.0}%)", label, magnitude, percent_change)
            }
            TraceStep::CombinedMultiplier { multiplier, baseline, adjusted } => {
                write!(
                    f,
                    "Combined multiplier: x{:.4} -> {:.2} x {:.4} = {:.2} mL/kg/day",
                    multiplier, baseline, multiplier, adjusted
                )
            }
            TraceStep::Addition { label, amount, before, after } => {
                write!(
                    f,
                    "{}: +{:.2} mL/kg/day -> {:.2} + {:.2} = {:.2} mL/kg/day",
                    label, amount, before, amount, after
                )
            }
            TraceStep::AdditionSkipped { label, reason } => {
                write!(f, "{}: not applied ({})", label, reason)
            }
            TraceStep::Summary { per_kg_per_day_rate, weight_kg, total_ml_per_day } => {
                write!(
                    f,
                    "IWL rate: {:.2} mL/kg/day\nTotal IWL: {:.2} mL/kg/day x {:.3} kg = {:.2} mL/day",
                    per_kg_per_day_rate, per_kg_per_day_rate, weight_kg, total_ml_per_day
                )
            }
        }
    }
}

/// Output of one engine run. Replaced wholesale on each recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Weight the result was computed for (grams)
    pub weight_grams: f64,
    /// Baseline rate of the matched band (mL/kg/day)
    pub baseline_rate: f64,
    /// Product of the applied multiplicative factors (1.0 if none)
    pub applied_multiplier: f64,
    /// Adjusted rate rounded to 2 decimals (mL/kg/day)
    pub per_kg_per_day_rate: f64,
    /// per_kg_per_day_rate × weight, rounded to 2 decimals (mL/day)
    pub total_ml_per_day: f64,
    /// Ordered derivation
    pub trace: Vec<TraceStep>,
}

impl CalculationResult {
    /// Trace as display lines
    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.iter().map(ToString::to_string).collect()
    }

    /// Trace as one newline-joined block
    pub fn trace_text(&self) -> String {
        self.trace_lines().join("\n")
    }
}
