use neoiwl::core::{round2, BaselineTable, CalculationEngine, ReactiveController, Validator};
use neoiwl::types::{FactorSelection, FEVER, HUMIDIFIED_ENV, PHOTOTHERAPY, RADIANT_WARMER};
use proptest::prelude::*;

const IDS: [&str; 4] = [RADIANT_WARMER, FEVER, HUMIDIFIED_ENV, PHOTOTHERAPY];

fn selection_from(mask: [bool; 4]) -> FactorSelection {
    FactorSelection::with_active(
        IDS.iter().zip(mask).filter(|(_, on)| *on).map(|(id, _)| *id),
    )
}

proptest! {
    #[test]
    fn every_valid_weight_has_exactly_one_band(w in 200.0001f64..=10_000.0) {
        let table = BaselineTable::standard();
        prop_assert_eq!(table.band_count_for(w), 1);
        prop_assert!(table.lookup(w).is_ok());
    }

    #[test]
    fn compute_is_idempotent(w in 200.01f64..=10_000.0, mask in any::<[bool; 4]>()) {
        let engine = CalculationEngine::standard();
        let selection = selection_from(mask);
        let a = engine.compute(w, &selection).unwrap();
        let b = engine.compute(w, &selection).unwrap();
        prop_assert_eq!(a.trace_text(), b.trace_text());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn total_is_rounded_rate_times_kg(w in 200.01f64..=10_000.0, mask in any::<[bool; 4]>()) {
        let engine = CalculationEngine::standard();
        let result = engine.compute(w, &selection_from(mask)).unwrap();
        prop_assert_eq!(result.per_kg_per_day_rate, round2(result.per_kg_per_day_rate));
        prop_assert_eq!(
            result.total_ml_per_day,
            round2(result.per_kg_per_day_rate * w / 1000.0)
        );
    }

    #[test]
    fn radiant_warmer_never_lowers_rate(w in 200.01f64..=10_000.0) {
        let engine = CalculationEngine::standard();
        let plain = engine.compute(w, &FactorSelection::new()).unwrap();
        let warm = engine
            .compute(w, &FactorSelection::with_active([RADIANT_WARMER]))
            .unwrap();
        prop_assert!(warm.per_kg_per_day_rate > plain.per_kg_per_day_rate);
    }

    #[test]
    fn phototherapy_only_counts_at_or_below_2000(w in 200.01f64..=10_000.0) {
        let engine = CalculationEngine::standard();
        let plain = engine.compute(w, &FactorSelection::new()).unwrap();
        let photo = engine
            .compute(w, &FactorSelection::with_active([PHOTOTHERAPY]))
            .unwrap();
        let delta = photo.per_kg_per_day_rate - plain.per_kg_per_day_rate;
        if w <= 2000.0 {
            prop_assert!((delta - 15.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(delta, 0.0);
        }
    }

    #[test]
    fn validator_accepts_exactly_the_supported_range(w in -1_000.0f64..20_000.0) {
        let valid = Validator::new().is_valid(&w.to_string());
        prop_assert_eq!(valid, w > 200.0 && w <= 10_000.0);
    }

    #[test]
    fn last_text_wins(texts in prop::collection::vec("[0-9]{1,5}", 1..8)) {
        let mut controller = ReactiveController::standard();
        let tokens: Vec<_> = texts
            .iter()
            .map(|t| controller.set_weight_text(t.as_str()).token)
            .collect();
        for token in tokens {
            controller.debounce_elapsed(token);
        }
        prop_assert_eq!(controller.recompute_count(), 1);
        prop_assert_eq!(controller.weight_text(), texts.last().unwrap().as_str());
    }
}
