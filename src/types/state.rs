//! Controller phase definitions

use serde::{Deserialize, Serialize};

/// The four phases of the reactive controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerPhase {
    /// No weight entered (or text cleared)
    Idle,
    /// Weight text changed, debounce timer running
    Pending,
    /// Synchronous engine run in progress
    Computing,
    /// Result or validation error available
    Settled,
}

impl ControllerPhase {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ControllerPhase::Idle => "\x1b[90m",      // Gray
            ControllerPhase::Pending => "\x1b[33m",   // Yellow
            ControllerPhase::Computing => "\x1b[36m", // Cyan
            ControllerPhase::Settled => "\x1b[32m",   // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            ControllerPhase::Idle => "⏳",
            ControllerPhase::Pending => "⌛",
            ControllerPhase::Computing => "⚙",
            ControllerPhase::Settled => "💧",
        }
    }
}

impl std::fmt::Display for ControllerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ControllerPhase::Idle => "IDLE",
            ControllerPhase::Pending => "PENDING",
            ControllerPhase::Computing => "COMPUTING",
            ControllerPhase::Settled => "SETTLED",
        };
        write!(f, "{}", name)
    }
}
