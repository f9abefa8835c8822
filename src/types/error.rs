//! Error types

use serde::{Deserialize, Serialize};

/// Why a raw weight input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("Please enter a valid number for birth weight")]
    NotANumber,

    #[error("Birth weight must be greater than 0 g")]
    NonPositive,

    #[error("Birth weight above 10000 g is outside the supported range")]
    TooHigh,

    #[error("Birth weight must be above 200 g")]
    TooLow,
}

impl ValidationError {
    /// Stable code string (for logging and parseable output)
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotANumber => "NOT_A_NUMBER",
            Self::NonPositive => "NON_POSITIVE",
            Self::TooHigh => "TOO_HIGH",
            Self::TooLow => "TOO_LOW",
        }
    }
}

/// Baseline table / factor catalog failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("baseline table has no bands")]
    EmptyTable,

    #[error("first band must start at 0 g, starts at {min_grams} g")]
    DoesNotStartAtZero { min_grams: f64 },

    #[error("band {index} starts at {min_grams} g, expected {expected} g")]
    NotContiguous { index: usize, min_grams: f64, expected: f64 },

    #[error("band {index} has max {max_grams} g below its min {min_grams} g")]
    InvertedBand { index: usize, min_grams: f64, max_grams: f64 },

    #[error("only the last band may be unbounded (band {index} is not last)")]
    UnboundedBeforeEnd { index: usize },

    #[error("last band must be unbounded")]
    BoundedLastBand,

    #[error("no band covers weight {weight_grams} g")]
    BandNotFound { weight_grams: f64 },

    #[error("duplicate factor id: {id}")]
    DuplicateFactor { id: String },

    #[error("multiplicative factor {id} must have magnitude > 0, got {magnitude}")]
    NonPositiveMultiplier { id: String, magnitude: f64 },
}

/// Controller event rejections
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("unknown factor id: {0}")]
    UnknownFactor(String),
}
