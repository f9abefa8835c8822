//! Baseline table: weight bands → baseline IWL rate
//!
//! Bands are whole-gram ranges; a band matches on its inclusive upper
//! edge, so its effective interval is (previous max, max]. A fractional
//! weight between two whole-gram edges (e.g. 1000.5) therefore falls in
//! the higher band.

use crate::{
    BASELINE_RATE_UNDER_750, BASELINE_RATE_750_1000, BASELINE_RATE_1001_1250,
    BASELINE_RATE_1251_1500, BASELINE_RATE_1501_2000, BASELINE_RATE_OVER_2000,
};
use crate::types::{TableError, WeightBand};

/// Gap between one band's max and the next band's min
const BAND_STEP_GRAMS: f64 = 1.0;

/// Ordered, exhaustive set of weight bands
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    bands: Vec<WeightBand>,
}

impl BaselineTable {
    /// Build a table, checking that the bands cover [0, ∞) exactly once
    pub fn new(bands: Vec<WeightBand>) -> Result<Self, TableError> {
        let first = bands.first().ok_or(TableError::EmptyTable)?;
        if first.min_grams != 0.0 {
            return Err(TableError::DoesNotStartAtZero { min_grams: first.min_grams });
        }

        let last_index = bands.len() - 1;
        for (index, band) in bands.iter().enumerate() {
            match band.max_grams {
                Some(max_grams) if max_grams < band.min_grams => {
                    return Err(TableError::InvertedBand {
                        index,
                        min_grams: band.min_grams,
                        max_grams,
                    });
                }
                None if index != last_index => {
                    return Err(TableError::UnboundedBeforeEnd { index });
                }
                _ => {}
            }

            if index > 0 {
                // Checked above: every band before the last is bounded
                let expected = bands[index - 1].max_grams.unwrap_or(f64::INFINITY) + BAND_STEP_GRAMS;
                if band.min_grams != expected {
                    return Err(TableError::NotContiguous {
                        index,
                        min_grams: band.min_grams,
                        expected,
                    });
                }
            }
        }

        if !bands[last_index].is_unbounded() {
            return Err(TableError::BoundedLastBand);
        }

        Ok(Self { bands })
    }

    /// The built-in neonatal table
    pub fn standard() -> Self {
        Self {
            bands: vec![
                WeightBand::bounded(0.0, 749.0, BASELINE_RATE_UNDER_750),
                WeightBand::bounded(750.0, 1000.0, BASELINE_RATE_750_1000),
                WeightBand::bounded(1001.0, 1250.0, BASELINE_RATE_1001_1250),
                WeightBand::bounded(1251.0, 1500.0, BASELINE_RATE_1251_1500),
                WeightBand::bounded(1501.0, 2000.0, BASELINE_RATE_1501_2000),
                WeightBand::unbounded(2001.0, BASELINE_RATE_OVER_2000),
            ],
        }
    }

    /// Find the band for a weight.
    ///
    /// Negative or NaN weights have no band.
    pub fn lookup(&self, weight_grams: f64) -> Result<&WeightBand, TableError> {
        if weight_grams.is_nan() || weight_grams < 0.0 {
            return Err(TableError::BandNotFound { weight_grams });
        }
        self.bands
            .iter()
            .find(|band| band.within_upper(weight_grams))
            .ok_or(TableError::BandNotFound { weight_grams })
    }

    /// Number of bands whose effective interval contains the weight
    pub fn band_count_for(&self, weight_grams: f64) -> usize {
        let mut lower_exclusive: Option<f64> = None;
        let mut count = 0;
        for band in &self.bands {
            let above_lower = match lower_exclusive {
                Some(lower) => weight_grams > lower,
                None => weight_grams >= band.min_grams,
            };
            if above_lower && band.within_upper(weight_grams) {
                count += 1;
            }
            lower_exclusive = band.max_grams;
        }
        count
    }

    /// Bands in ascending order
    pub fn bands(&self) -> &[WeightBand] {
        &self.bands
    }
}

impl Default for BaselineTable {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_valid() {
        let table = BaselineTable::standard();
        let rebuilt = BaselineTable::new(table.bands().to_vec());
        assert_eq!(rebuilt, Ok(table));
    }

    #[test]
    fn test_band_edges() {
        let table = BaselineTable::standard();
        let cases = [
            (0.0, 150.0),
            (749.0, 150.0),
            (750.0, 65.0),
            (1000.0, 65.0),
            (1001.0, 55.0),
            (1250.0, 55.0),
            (1251.0, 35.0),
            (1500.0, 35.0),
            (1501.0, 25.0),
            (2000.0, 25.0),
            (2001.0, 17.5),
            (10_000.0, 17.5),
        ];
        for (weight, rate) in cases {
            assert_eq!(table.lookup(weight).unwrap().baseline_rate, rate, "weight {}", weight);
        }
    }

    #[test]
    fn test_fractional_weight_falls_in_higher_band() {
        let table = BaselineTable::standard();
        assert_eq!(table.lookup(1000.5).unwrap().baseline_rate, 55.0);
        assert_eq!(table.lookup(2000.01).unwrap().baseline_rate, 17.5);
        assert_eq!(table.band_count_for(1000.5), 1);
    }

    #[test]
    fn test_negative_weight_not_found() {
        let table = BaselineTable::standard();
        assert!(matches!(table.lookup(-1.0), Err(TableError::BandNotFound { .. })));
        assert!(table.lookup(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_gap() {
        let bands = vec![
            WeightBand::bounded(0.0, 749.0, 150.0),
            WeightBand::unbounded(800.0, 65.0),
        ];
        assert_eq!(
            BaselineTable::new(bands),
            Err(TableError::NotContiguous { index: 1, min_grams: 800.0, expected: 750.0 })
        );
    }

    #[test]
    fn test_rejects_bounded_last_band() {
        let bands = vec![WeightBand::bounded(0.0, 749.0, 150.0)];
        assert_eq!(BaselineTable::new(bands), Err(TableError::BoundedLastBand));
    }

    #[test]
    fn test_rejects_empty_and_offset_start() {
        assert_eq!(BaselineTable::new(vec![]), Err(TableError::EmptyTable));
        assert_eq!(
            BaselineTable::new(vec![WeightBand::unbounded(100.0, 17.5)]),
            Err(TableError::DoesNotStartAtZero { min_grams: 100.0 })
        );
    }

    #[test]
    fn test_rejects_unbounded_middle_band() {
        let bands = vec![
            WeightBand::unbounded(0.0, 150.0),
            WeightBand::unbounded(750.0, 65.0),
        ];
        assert_eq!(
            BaselineTable::new(bands),
            Err(TableError::UnboundedBeforeEnd { index: 0 })
        );
    }
}
