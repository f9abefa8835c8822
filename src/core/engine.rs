//! Calculation engine: (weight, active factors) → IWL rate + trace
//!
//! Order of application:
//! 1. baseline rate from the weight band
//! 2. product of active multiplicative factors (catalog order)
//! 3. adjusted = baseline × combined multiplier
//! 4. active additive factors that apply at this weight (catalog order)
//! 5. round the per-kg rate to 2 dp, then total = round(rate × kg, 2)

use crate::core::{BaselineTable, FactorCatalog};
use crate::types::{
    CalculationResult, FactorKind, FactorSelection, TableError, TraceStep,
};

/// Pure IWL calculator over injected constant tables
#[derive(Debug, Clone, Default)]
pub struct CalculationEngine {
    table: BaselineTable,
    catalog: FactorCatalog,
}

impl CalculationEngine {
    /// Create engine over the given tables
    pub fn new(table: BaselineTable, catalog: FactorCatalog) -> Self {
        Self { table, catalog }
    }

    /// Engine over the built-in tables
    pub fn standard() -> Self {
        Self::new(BaselineTable::standard(), FactorCatalog::standard())
    }

    /// Compute the IWL for an already-validated weight.
    ///
    /// Only fails if the baseline table has no band for the weight.
    pub fn compute(
        &self,
        weight_grams: f64,
        selection: &FactorSelection,
    ) -> Result<CalculationResult, TableError> {
        let band = self.table.lookup(weight_grams)?;
        let baseline = band.baseline_rate;

        let mut trace = vec![TraceStep::Baseline {
            band_label: band.label.clone(),
            rate: baseline,
        }];

        let mut combined_multiplier = 1.0;
        for factor in self.catalog.of_kind(FactorKind::Multiplicative) {
            if !selection.is_active(&factor.id) || !factor.applies_to(weight_grams) {
                continue;
            }
            combined_multiplier *= factor.magnitude;
            trace.push(TraceStep::Multiplier {
                label: factor.label.clone(),
                magnitude: factor.magnitude,
                percent_change: factor.percent_change(),
            });
        }

        let mut adjusted = baseline * combined_multiplier;
        trace.push(TraceStep::CombinedMultiplier {
            multiplier: combined_multiplier,
            baseline,
            adjusted,
        });

        for factor in self.catalog.of_kind(FactorKind::Additive) {
            if !selection.is_active(&factor.id) {
                continue;
            }
            match factor.applicability.skip_reason(weight_grams) {
                None => {
                    let before = adjusted;
                    adjusted += factor.magnitude;
                    trace.push(TraceStep::Addition {
                        label: factor.label.clone(),
                        amount: factor.magnitude,
                        before,
                        after: adjusted,
                    });
                }
                Some(reason) => {
                    trace.push(TraceStep::AdditionSkipped {
                        label: factor.label.clone(),
                        reason,
                    });
                }
            }
        }

        let per_kg_per_day_rate = round2(adjusted);
        let weight_kg = weight_grams / 1000.0;
        let total_ml_per_day = round2(per_kg_per_day_rate * weight_grams / 1000.0);

        trace.push(TraceStep::Summary {
            per_kg_per_day_rate,
            weight_kg,
            total_ml_per_day,
        });

        Ok(CalculationResult {
            weight_grams,
            baseline_rate: baseline,
            applied_multiplier: combined_multiplier,
            per_kg_per_day_rate,
            total_ml_per_day,
            trace,
        })
    }

    pub fn table(&self) -> &BaselineTable {
        &self.table
    }

    pub fn catalog(&self) -> &FactorCatalog {
        &self.catalog
    }
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// TESTS
// =============================================================================
