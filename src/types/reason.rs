//! Reason codes attached to every controller snapshot

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Why the controller emitted a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Weight input
    // =========================================================================
    /// Weight text stored, waiting for debounce
    R001_WEIGHT_TEXT_CHANGED,
    /// Weight text empty, nothing to compute
    R001_WEIGHT_EMPTY,

    // =========================================================================
    // R002: Phases
    // =========================================================================
    /// Result computed
    R002_RESULT_READY,
    /// Controller re-initialized
    R002_RESET,

    // =========================================================================
    // R003: Debounce
    // =========================================================================
    /// Debounce fired for the current token
    R003_DEBOUNCE_FIRED,

    // =========================================================================
    // R004: Validation
    // =========================================================================
    /// Input did not parse as a number
    R004_NOT_A_NUMBER,
    /// Input <= 0
    R004_NON_POSITIVE,
    /// Input > 10000 g
    R004_TOO_HIGH,
    /// Input <= 200 g
    R004_TOO_LOW,

    // =========================================================================
    // R005: Triggers
    // =========================================================================
    /// Factor toggled
    R005_FACTOR_TOGGLED,
    /// Explicit "calculate now"
    R005_MANUAL_RECOMPUTE,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_WEIGHT_TEXT_CHANGED => "R001_WEIGHT_TEXT_CHANGED",
            Self::R001_WEIGHT_EMPTY => "R001_WEIGHT_EMPTY",
            Self::R002_RESULT_READY => "R002_RESULT_READY",
            Self::R002_RESET => "R002_RESET",
            Self::R003_DEBOUNCE_FIRED => "R003_DEBOUNCE_FIRED",
            Self::R004_NOT_A_NUMBER => "R004_NOT_A_NUMBER",
            Self::R004_NON_POSITIVE => "R004_NON_POSITIVE",
            Self::R004_TOO_HIGH => "R004_TOO_HIGH",
            Self::R004_TOO_LOW => "R004_TOO_LOW",
            Self::R005_FACTOR_TOGGLED => "R005_FACTOR_TOGGLED",
            Self::R005_MANUAL_RECOMPUTE => "R005_MANUAL_RECOMPUTE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_WEIGHT_TEXT_CHANGED => "Weight text changed",
            Self::R001_WEIGHT_EMPTY => "No weight entered",
            Self::R002_RESULT_READY => "Result ready",
            Self::R002_RESET => "Calculator reset",
            Self::R003_DEBOUNCE_FIRED => "Typing paused, recomputing",
            Self::R004_NOT_A_NUMBER => "Weight is not a number",
            Self::R004_NON_POSITIVE => "Weight must be positive",
            Self::R004_TOO_HIGH => "Weight above supported range",
            Self::R004_TOO_LOW => "Weight below supported range",
            Self::R005_FACTOR_TOGGLED => "Factor toggled",
            Self::R005_MANUAL_RECOMPUTE => "Manual recompute",
        }
    }
}

impl From<ValidationError> for ReasonCode {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NotANumber => Self::R004_NOT_A_NUMBER,
            ValidationError::NonPositive => Self::R004_NON_POSITIVE,
            ValidationError::TooHigh => Self::R004_TOO_HIGH,
            ValidationError::TooLow => Self::R004_TOO_LOW,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
