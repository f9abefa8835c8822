//! Validator: raw weight text → grams, or a validation error
//!
//! Precedence: numeric → non-positive → too high → too low.

use lazy_static::lazy_static;
use regex::Regex;
use crate::{MAX_WEIGHT_GRAMS, MIN_WEIGHT_GRAMS};
use crate::types::ValidationError;

lazy_static! {
    /// Everything that is not a digit or a decimal point
    static ref RE_NON_NUMERIC: Regex = Regex::new(r"[^0-9.]").unwrap();

    /// Leading minus sign in front of the number ("-5 g", "-1,500")
    static ref RE_LEADING_MINUS: Regex = Regex::new(r"^-\s*[0-9.]").unwrap();
}

/// Checks weight text for numeric and clinical validity
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate raw text, returning the weight in grams
    pub fn validate(&self, raw_text: &str) -> Result<f64, ValidationError> {
        let weight_grams = parse_weight(raw_text)?;

        if weight_grams <= 0.0 {
            return Err(ValidationError::NonPositive);
        }
        if weight_grams > MAX_WEIGHT_GRAMS {
            return Err(ValidationError::TooHigh);
        }
        if weight_grams <= MIN_WEIGHT_GRAMS {
            return Err(ValidationError::TooLow);
        }

        Ok(weight_grams)
    }

    /// Is the text a valid weight?
    pub fn is_valid(&self, raw_text: &str) -> bool {
        self.validate(raw_text).is_ok()
    }
}

/// Parse the text as a float; failing that, strip stray characters
/// ("1,500", "1500 g") and parse again. A leading minus is kept through the strip.
fn parse_weight(raw_text: &str) -> Result<f64, ValidationError> {
    let text = raw_text.trim();

    if let Ok(value) = text.parse::<f64>() {
        if !value.is_nan() {
            return Ok(value);
        }
    }

    let negative = RE_LEADING_MINUS.is_match(text);
    let stripped = RE_NON_NUMERIC.replace_all(text, "");
    match stripped.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(if negative { -value } else { value }),
        _ => Err(ValidationError::NotANumber),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let v = Validator::new();
        assert_eq!(v.validate("200"), Err(ValidationError::TooLow));
        assert_eq!(v.validate("200.01"), Ok(200.01));
        assert_eq!(v.validate("10000"), Ok(10_000.0));
        assert_eq!(v.validate("10000.01"), Err(ValidationError::TooHigh));
    }

    #[test]
    fn test_non_positive() {
        let v = Validator::new();
        assert_eq!(v.validate("-5"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("0"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("-0.0"), Err(ValidationError::NonPositive));
    }

    #[test]
    fn test_minus_survives_stray_characters() {
        let v = Validator::new();
        assert_eq!(v.validate("-5 g"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("-1500 g"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("-1,500"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("- 1500"), Err(ValidationError::NonPositive));
        assert_eq!(v.validate("1500-"), Ok(1500.0));
    }

    #[test]
    fn test_not_a_number() {
        let v = Validator::new();
        assert_eq!(v.validate("abc"), Err(ValidationError::NotANumber));
        assert_eq!(v.validate(""), Err(ValidationError::NotANumber));
        assert_eq!(v.validate("NaN"), Err(ValidationError::NotANumber));
        assert_eq!(v.validate("1.2.3"), Err(ValidationError::NotANumber));
        assert_eq!(v.validate("."), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_stray_characters_stripped() {
        let v = Validator::new();
        assert_eq!(v.validate("1,500"), Ok(1500.0));
        assert_eq!(v.validate("1500 g"), Ok(1500.0));
        assert_eq!(v.validate("  1200  "), Ok(1200.0));
    }

    #[test]
    fn test_infinity_is_too_high() {
        let v = Validator::new();
        assert_eq!(v.validate("inf"), Err(ValidationError::TooHigh));
    }

    #[test]
    fn test_small_positive_is_too_low() {
        let v = Validator::new();
        assert_eq!(v.validate("0.5"), Err(ValidationError::TooLow));
        assert!(!v.is_valid("150"));
        assert!(v.is_valid("201"));
    }
}
