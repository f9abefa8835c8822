//! Factor catalog: the registered environmental factors, in order
//!
//! Registration order is the order factors are applied and traced.

use std::collections::HashSet;

use crate::{
    RADIANT_WARMER_MULTIPLIER, FEVER_MULTIPLIER, HUMIDIFIED_ENV_MULTIPLIER,
    PHOTOTHERAPY_ADDITION, PHOTOTHERAPY_MAX_WEIGHT_GRAMS,
};
use crate::types::{
    Applicability, EnvironmentalFactor, FactorKind, TableError,
    FEVER, HUMIDIFIED_ENV, PHOTOTHERAPY, RADIANT_WARMER,
};

/// Ordered registry of environmental factors
#[derive(Debug, Clone, PartialEq)]
pub struct FactorCatalog {
    factors: Vec<EnvironmentalFactor>,
}

impl FactorCatalog {
    /// Build a catalog, checking unique ids and positive multipliers
    pub fn new(factors: Vec<EnvironmentalFactor>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for factor in &factors {
            if !seen.insert(factor.id.as_str()) {
                return Err(TableError::DuplicateFactor { id: factor.id.clone() });
            }
            if factor.kind == FactorKind::Multiplicative && (factor.magnitude.is_nan() || factor.magnitude <= 0.0) {
                return Err(TableError::NonPositiveMultiplier {
                    id: factor.id.clone(),
                    magnitude: factor.magnitude,
                });
            }
        }
        Ok(Self { factors })
    }

    /// The four built-in factors
    pub fn standard() -> Self {
        Self {
            factors: vec![
                EnvironmentalFactor::new(
                    RADIANT_WARMER,
                    "Radiant warmer",
                    FactorKind::Multiplicative,
                    RADIANT_WARMER_MULTIPLIER,
                    "Open radiant warmer increases evaporative loss",
                ),
                EnvironmentalFactor::new(
                    FEVER,
                    "Fever",
                    FactorKind::Multiplicative,
                    FEVER_MULTIPLIER,
                    "Elevated body temperature increases loss",
                ),
                EnvironmentalFactor::new(
                    HUMIDIFIED_ENV,
                    "Humidified incubator",
                    FactorKind::Multiplicative,
                    HUMIDIFIED_ENV_MULTIPLIER,
                    "Humidified environment reduces transepidermal loss",
                ),
                EnvironmentalFactor::new(
                    PHOTOTHERAPY,
                    "Phototherapy",
                    FactorKind::Additive,
                    PHOTOTHERAPY_ADDITION,
                    "Phototherapy adds loss in low birth weight infants",
                )
                .with_applicability(Applicability::AtOrBelow {
                    max_grams: PHOTOTHERAPY_MAX_WEIGHT_GRAMS,
                }),
            ],
        }
    }

    /// All factors in registration order
    pub fn all(&self) -> &[EnvironmentalFactor] {
        &self.factors
    }

    /// Find a factor by id
    pub fn get(&self, id: &str) -> Option<&EnvironmentalFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Factors of one kind, in registration order
    pub fn of_kind(&self, kind: FactorKind) -> impl Iterator<Item = &EnvironmentalFactor> {
        self.factors.iter().filter(move |f| f.kind == kind)
    }
}

impl Default for FactorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// TESTS
// =============================================================================
