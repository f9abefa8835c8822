//! Read-only snapshot handed to the presentation layer

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{ControllerPhase, ReasonCode};

/// Emitted after every controller transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Current phase
    pub phase: ControllerPhase,
    /// Why this snapshot was emitted
    pub reason: ReasonCode,
    /// Raw weight text, echoed back for the input field
    pub weight_text: String,
    /// mL/kg/day, None unless a result is available
    pub per_kg_per_day_rate: Option<f64>,
    /// mL/day, None unless a result is available
    pub total_ml_per_day: Option<f64>,
    /// Newline-joined derivation, empty without a result
    pub trace_text: String,
    /// Validation message, None unless the input was rejected
    pub error_message: Option<String>,
    /// True only during the Computing step
    pub is_busy: bool,
}

impl Snapshot {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = ControllerPhase::color_reset();
        let emoji = self.phase.emoji();

        format!(
            "{}{} {} | phase={} | {}{}",
            color,
            emoji,
            self.headline(),
            self.phase,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "rate={} | total={} | phase={} | reason={}{}",
            display_opt(self.per_kg_per_day_rate),
            display_opt(self.total_ml_per_day),
            self.phase,
            self.reason.code(),
            self.error_message
                .as_ref()
                .map(|m| format!(" | error={}", m))
                .unwrap_or_default()
        )
    }

    /// Has a result to show?
    pub fn has_result(&self) -> bool {
        self.per_kg_per_day_rate.is_some()
    }

    fn headline(&self) -> String {
        match (&self.error_message, self.per_kg_per_day_rate, self.total_ml_per_day) {
            (Some(message), _, _) => format!("error: {}", message),
            (None, Some(rate), Some(total)) => {
                format!("IWL {:.2} mL/kg/day = {:.2} mL/day", rate, total)
            }
            _ => "no result".to_string(),
        }
    }
}

fn display_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}
