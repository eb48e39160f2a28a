//! Tabular input types: price levels, expenditure weights, labor-market slack.
//!
//! Category and group identifiers are opaque strings read from the data at
//! runtime. Nothing in this crate special-cases a particular label; the keyed
//! collections here are the only way the engine sees the tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;

/// Absolute tolerance for a group's weights summing to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

// ---------------------------------------------------------------------------
// Price levels
// ---------------------------------------------------------------------------

/// One period's price index levels, keyed by category identifier.
///
/// Serializes flat: `{"period": "2024-11", "FOOD": 104.2, "HOUSING": 101.8}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRow {
    /// Year-month identifier, `YYYY-MM`.
    pub period: String,
    /// Index level per category. Levels must be strictly positive.
    #[serde(flatten)]
    pub levels: BTreeMap<String, f64>,
}

/// Price level table: at most one row per period, strictly positive levels.
///
/// Both invariants are enforced at construction so downstream arithmetic can
/// rely on them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevelTable {
    rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PriceLevelTable {
    /// Build a table from rows, rejecting duplicate periods and non-positive
    /// levels.
    pub fn from_rows(rows: Vec<PriceRow>) -> Result<Self, EngineError> {
        let mut by_period = BTreeMap::new();
        for row in rows {
            for (category, &level) in &row.levels {
                if !(level > 0.0) {
                    return Err(EngineError::NonPositiveLevel {
                        period: row.period.clone(),
                        category: category.clone(),
                        value: level,
                    });
                }
            }
            if by_period.insert(row.period.clone(), row.levels).is_some() {
                return Err(EngineError::DuplicatePeriod { period: row.period });
            }
        }
        Ok(Self { rows: by_period })
    }

    /// Levels for one period, keyed by category.
    pub fn row(&self, period: &str) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(period)
    }

    /// Level for one (period, category) cell.
    pub fn level(&self, period: &str, category: &str) -> Option<f64> {
        self.rows.get(period).and_then(|r| r.get(category)).copied()
    }

    /// Periods present, in sorted order.
    pub fn periods(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Expenditure weights
// ---------------------------------------------------------------------------

/// One (group, category, weight) row of the expenditure weight table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightRow {
    pub group: String,
    pub category: String,
    /// Expenditure share in [0, 1].
    pub weight: f64,
}

/// Expenditure weight table.
///
/// Row order is preserved; groups are reported in first-appearance order so
/// identical inputs always produce identically ordered outputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightTable {
    rows: Vec<WeightRow>,
}

impl WeightTable {
    pub fn new(rows: Vec<WeightRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WeightRow] {
        &self.rows
    }

    /// Distinct group identifiers in first-appearance order.
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.group.as_str()) {
                seen.push(row.group.as_str());
            }
        }
        seen
    }

    /// Weight rows belonging to one group, in table order.
    pub fn group_rows<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a WeightRow> {
        self.rows.iter().filter(move |r| r.group == group)
    }

    /// Sum of one group's weights.
    pub fn group_sum(&self, group: &str) -> f64 {
        self.group_rows(group).map(|r| r.weight).sum()
    }

    /// Check the sum-to-one invariant for every group present.
    pub fn validate(&self) -> Result<(), EngineError> {
        for group in self.groups() {
            let sum = self.group_sum(group);
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(EngineError::WeightImbalance {
                    group: group.to_string(),
                    sum,
                    tolerance: WEIGHT_SUM_TOLERANCE,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Slack series
// ---------------------------------------------------------------------------

/// One observation of the labor-market slack series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlackRow {
    pub period: String,
    /// Geography identifier; a series without geographies is treated as
    /// ungrouped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    pub value: f64,
}

/// Slack time series: at most one value per (period, geography).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlackSeries {
    rows: Vec<SlackRow>,
}

impl SlackSeries {
    pub fn new(rows: Vec<SlackRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SlackRow] {
        &self.rows
    }

    /// Whether any row carries a geography identifier.
    pub fn has_geography(&self) -> bool {
        self.rows.iter().any(|r| r.geography.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_row(period: &str, levels: &[(&str, f64)]) -> PriceRow {
        PriceRow {
            period: period.to_string(),
            levels: levels
                .iter()
                .map(|&(c, v)| (c.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn table_rejects_duplicate_period() {
        let rows = vec![
            price_row("2024-01", &[("A", 100.0)]),
            price_row("2024-01", &[("A", 101.0)]),
        ];
        let err = PriceLevelTable::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicatePeriod {
                period: "2024-01".to_string()
            }
        );
    }

    #[test]
    fn table_rejects_non_positive_level() {
        let rows = vec![price_row("2024-01", &[("A", 0.0)])];
        assert!(matches!(
            PriceLevelTable::from_rows(rows),
            Err(EngineError::NonPositiveLevel { .. })
        ));
    }

    #[test]
    fn table_lookup() {
        let table =
            PriceLevelTable::from_rows(vec![price_row("2024-01", &[("A", 100.0), ("B", 200.0)])])
                .unwrap();
        assert_eq!(table.level("2024-01", "B"), Some(200.0));
        assert_eq!(table.level("2024-02", "B"), None);
        assert_eq!(table.level("2024-01", "C"), None);
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let table = WeightTable::new(vec![
            WeightRow {
                group: "Q2".to_string(),
                category: "A".to_string(),
                weight: 1.0,
            },
            WeightRow {
                group: "Q1".to_string(),
                category: "A".to_string(),
                weight: 0.5,
            },
            WeightRow {
                group: "Q2".to_string(),
                category: "B".to_string(),
                weight: 0.0,
            },
            WeightRow {
                group: "Q1".to_string(),
                category: "B".to_string(),
                weight: 0.5,
            },
        ]);
        assert_eq!(table.groups(), vec!["Q2", "Q1"]);
    }

    #[test]
    fn validate_flags_imbalanced_group() {
        let table = WeightTable::new(vec![
            WeightRow {
                group: "Q1".to_string(),
                category: "A".to_string(),
                weight: 0.3,
            },
            WeightRow {
                group: "Q1".to_string(),
                category: "B".to_string(),
                weight: 0.3,
            },
        ]);
        match table.validate() {
            Err(EngineError::WeightImbalance { group, sum, .. }) => {
                assert_eq!(group, "Q1");
                assert!((sum - 0.6).abs() < 1e-12);
            }
            other => panic!("expected WeightImbalance, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_within_tolerance() {
        let table = WeightTable::new(vec![
            WeightRow {
                group: "Q1".to_string(),
                category: "A".to_string(),
                weight: 0.4004,
            },
            WeightRow {
                group: "Q1".to_string(),
                category: "B".to_string(),
                weight: 0.6001,
            },
        ]);
        assert!(table.validate().is_ok());
    }
}
