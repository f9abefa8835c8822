//! Environmental factor definitions and the active-factor selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Built-in factor ids
pub const RADIANT_WARMER: &str = "radiantWarmer";
pub const FEVER: &str = "fever";
pub const HUMIDIFIED_ENV: &str = "humidifiedEnv";
pub const PHOTOTHERAPY: &str = "phototherapy";

/// How a factor combines with the baseline rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorKind {
    /// Folded into the combined multiplier
    Multiplicative,
    /// Added (mL/kg/day) after the multiplier
    Additive,
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FactorKind::Multiplicative => "MULTIPLICATIVE",
            FactorKind::Additive => "ADDITIVE",
        };
        write!(f, "{}", name)
    }
}

/// Weight condition under which a factor contributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Applicability {
    Always,
    /// Applies only when weight <= max_grams
    AtOrBelow { max_grams: f64 },
}

impl Applicability {
    /// Does the factor apply at this weight?
    pub fn applies_to(&self, weight_grams: f64) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::AtOrBelow { max_grams } => weight_grams <= *max_grams,
        }
    }

    /// Why the factor is skipped at this weight, or None if it applies
    pub fn skip_reason(&self, weight_grams: f64) -> Option<String> {
        match self {
            Applicability::AtOrBelow { max_grams } if weight_grams > *max_grams => {
                Some(format!("weight {} g exceeds {} g limit", weight_grams, max_grams))
            }
            _ => None,
        }
    }
}

/// A named environmental adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalFactor {
    /// Unique id, e.g. "radiantWarmer"
    pub id: String,
    /// Display label
    pub label: String,
    pub kind: FactorKind,
    /// Multiplier (Multiplicative) or mL/kg/day (Additive)
    pub magnitude: f64,
    pub applicability: Applicability,
    pub description: String,
}

impl EnvironmentalFactor {
    /// Create a factor that always applies
    pub fn new(id: &str, label: &str, kind: FactorKind, magnitude: f64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            magnitude,
            applicability: Applicability::Always,
            description: description.to_string(),
        }
    }

    /// Restrict the factor to a weight condition
    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn applies_to(&self, weight_grams: f64) -> bool {
        self.applicability.applies_to(weight_grams)
    }

    /// Percentage change a multiplier causes (1.75 → 75.0, 0.75 → -25.0)
    pub fn percent_change(&self) -> f64 {
        (self.magnitude - 1.0) * 100.0
    }
}

/// Which factors the user has toggled on.
///
/// Ids not present are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorSelection {
    active: BTreeSet<String>,
}

impl FactorSelection {
    /// Empty selection (everything off)
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with the given ids switched on
    pub fn with_active<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    /// Switch a factor on or off
    pub fn set(&mut self, id: &str, active: bool) {
        if active {
            self.active.insert(id.to_string());
        } else {
            self.active.remove(id);
        }
    }

    /// Active ids in sorted order
    pub fn active_ids(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
