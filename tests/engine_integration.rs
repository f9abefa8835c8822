//! Integration tests for the calculation path
//!
//! Tests: raw text → Validator → CalculationEngine → result + trace

use neoiwl::core::{BaselineTable, CalculationEngine, FactorCatalog, Validator};
use neoiwl::types::{
    Applicability, CalculationResult, EnvironmentalFactor, FactorKind, FactorSelection,
    TableError, TraceStep, ValidationError, WeightBand,
    FEVER, HUMIDIFIED_ENV, PHOTOTHERAPY, RADIANT_WARMER,
};
use pretty_assertions::assert_eq;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn compute(text: &str, active: &[&str]) -> CalculationResult {
    let weight = Validator::new().validate(text).unwrap();
    CalculationEngine::standard()
        .compute(weight, &FactorSelection::with_active(active.iter().copied()))
        .unwrap()
}

/// Worked example: 1200 g, radiant warmer + fever
#[test]
fn test_combined_factor_example() {
    let result = compute("1200", &[RADIANT_WARMER, FEVER]);

    assert_eq!(result.baseline_rate, 55.0);
    assert!(approx(result.applied_multiplier, 2.45));
    assert!(approx(result.per_kg_per_day_rate, 134.75));
    assert!(approx(result.total_ml_per_day, 161.70));

    let text = result.trace_text();
    assert!(text.contains("Radiant warmer: x1.75 (+75%)"));
    assert!(text.contains("Fever: x1.40 (+40%)"));
    assert!(text.contains("IWL rate: 134.75 mL/kg/day"));
    assert!(text.contains("134.75 mL/kg/day x 1.200 kg = 161.70 mL/day"));
}

/// Radiant warmer alone adds exactly 75% of baseline
#[test]
fn test_radiant_warmer_adds_75_percent() {
    for (text, baseline) in [("500", 150.0), ("900", 65.0), ("1400", 35.0), ("1800", 25.0)] {
        let plain = compute(text, &[]);
        let warmed = compute(text, &[RADIANT_WARMER]);
        assert!(warmed.per_kg_per_day_rate > plain.per_kg_per_day_rate);
        assert!(approx(warmed.per_kg_per_day_rate - plain.per_kg_per_day_rate, 0.75 * baseline));
    }
}

/// Humidified environment alone removes exactly 25% of baseline
#[test]
fn test_humidified_removes_25_percent() {
    for (text, baseline) in [("500", 150.0), ("1100", 55.0), ("1800", 25.0)] {
        let plain = compute(text, &[]);
        let humid = compute(text, &[HUMIDIFIED_ENV]);
        assert!(humid.per_kg_per_day_rate < plain.per_kg_per_day_rate);
        assert!(approx(plain.per_kg_per_day_rate - humid.per_kg_per_day_rate, 0.25 * baseline));
    }
}

/// Phototherapy adds 15 at exactly 2000 g
#[test]
fn test_phototherapy_at_gate() {
    let plain = compute("2000", &[]);
    let photo = compute("2000", &[PHOTOTHERAPY]);
    assert!(approx(photo.per_kg_per_day_rate - plain.per_kg_per_day_rate, 15.0));
    assert!(photo.trace_text().contains("Phototherapy: +15.00 mL/kg/day"));
}

/// Phototherapy adds nothing at 2001 g and says so
#[test]
fn test_phototherapy_past_gate_is_traced() {
    let plain = compute("2001", &[]);
    let photo = compute("2001", &[PHOTOTHERAPY]);
    assert_eq!(photo.per_kg_per_day_rate, plain.per_kg_per_day_rate);

    let skipped: Vec<&TraceStep> = photo
        .trace
        .iter()
        .filter(|s| matches!(s, TraceStep::AdditionSkipped { .. }))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(
        skipped[0].to_string(),
        "Phototherapy: not applied (weight 2001 g exceeds 2000 g limit)"
    );
}

/// Same inputs, same bytes
#[test]
fn test_compute_is_idempotent() {
    let a = compute("1337.5", &[RADIANT_WARMER, HUMIDIFIED_ENV, PHOTOTHERAPY]);
    let b = compute("1337.5", &[RADIANT_WARMER, HUMIDIFIED_ENV, PHOTOTHERAPY]);
    assert_eq!(a, b);
    assert_eq!(a.trace_text(), b.trace_text());
}

/// Validation boundaries
#[test]
fn test_validation_boundaries() {
    let v = Validator::new();
    assert_eq!(v.validate("200"), Err(ValidationError::TooLow));
    assert_eq!(v.validate("200.01"), Ok(200.01));
    assert_eq!(v.validate("10000"), Ok(10_000.0));
    assert_eq!(v.validate("10000.01"), Err(ValidationError::TooHigh));
    assert_eq!(v.validate("-5"), Err(ValidationError::NonPositive));
    assert_eq!(v.validate("abc"), Err(ValidationError::NotANumber));
}

/// Injected tables drive the engine
#[test]
fn test_custom_tables() {
    let table = BaselineTable::new(vec![
        WeightBand::bounded(0.0, 999.0, 100.0),
        WeightBand::unbounded(1000.0, 20.0),
    ])
    .unwrap();
    let catalog = FactorCatalog::new(vec![
        EnvironmentalFactor::new("cold", "Cold room", FactorKind::Multiplicative, 0.5, ""),
        EnvironmentalFactor::new("lamp", "Heat lamp", FactorKind::Additive, 4.0, "")
            .with_applicability(Applicability::AtOrBelow { max_grams: 1500.0 }),
    ])
    .unwrap();
    let engine = CalculationEngine::new(table, catalog);

    let result = engine
        .compute(1200.0, &FactorSelection::with_active(["cold", "lamp"]))
        .unwrap();
    // 20 × 0.5 + 4
    assert!(approx(result.per_kg_per_day_rate, 14.0));
    assert!(approx(result.total_ml_per_day, 16.8));
}

/// A weight outside every band is an error, never a zero rate
#[test]
fn test_missing_band_is_signaled() {
    let engine = CalculationEngine::standard();
    let err = engine.compute(-1.0, &FactorSelection::new()).unwrap_err();
    assert!(matches!(err, TableError::BandNotFound { .. }));
}

/// Result serializes to JSON and back
#[test]
fn test_result_json_roundtrip() {
    let result = compute("1200", &[PHOTOTHERAPY]);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"per_kg_per_day_rate\""));
    assert!(json.contains("\"step\":\"addition\""));

    let back: CalculationResult = serde_json::from_str(&json).unwrap();
    assert!(approx(back.per_kg_per_day_rate, result.per_kg_per_day_rate));
    assert_eq!(back.trace.len(), result.trace.len());
}
