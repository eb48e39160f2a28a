//! Group-weighted inflation aggregation with an exact contribution breakdown.
//!
//! For each group the engine computes the weighted geometric mean of the
//! category price relatives in log space, converts it to an exact percentage
//! change, and allocates per-category contributions that close on that total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::table::{WEIGHT_SUM_TOLERANCE, WeightTable};

/// Absolute tolerance (percentage points) for contributions closing on the
/// group total.
pub const CONTRIBUTION_TOLERANCE: f64 = 0.01;

/// One group's inflation figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupInflation {
    pub group: String,
    /// Year-over-year percentage change of the group's weighted price level.
    pub inflation_pct: f64,
}

/// One category's share of a group's inflation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryContribution {
    pub group: String,
    pub category: String,
    /// Percentage points contributed; a group's rows sum to its
    /// `inflation_pct` (except for groups listed in
    /// [`AggregateResult::unscaled_groups`]).
    pub contribution_pct: f64,
}

/// Aggregation output: per-group inflation plus the contribution breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateResult {
    pub inflation: Vec<GroupInflation>,
    pub contributions: Vec<CategoryContribution>,
    /// Groups whose naive contribution sum was exactly zero, so their
    /// contributions were emitted unscaled and are not guaranteed to close on
    /// the group total. Each occurrence is also logged.
    pub unscaled_groups: Vec<String>,
}

impl AggregateResult {
    /// Inflation figure for one group, if present.
    pub fn inflation_for(&self, group: &str) -> Option<f64> {
        self.inflation
            .iter()
            .find(|g| g.group == group)
            .map(|g| g.inflation_pct)
    }
}

/// Aggregate per-category price relatives into per-group inflation.
///
/// Per group `g` with weight rows `(c, w_c)`:
///
/// 1. validate `Σ w_c = 1.0 ± 0.001`;
/// 2. `log_sum = Σ w_c · ln(relative(c))`, failing if any required category
///    is absent from `relatives`;
/// 3. `inflation_pct = 100 · (exp(log_sum) − 1)` — the exact percentage
///    change of the weighted geometric-mean relative;
/// 4. first-order contributions `naive(c) = 100 · w_c · ln(relative(c))` are
///    rescaled by `inflation_pct / Σ naive` so they sum exactly to the total.
///
/// When `Σ naive` is exactly zero the rescale factor is undefined; the naive
/// contributions are emitted as-is, the group is recorded in
/// `unscaled_groups`, and a warning is logged. This is the one condition
/// under which contribution closure does not hold.
pub fn aggregate_inflation(
    relatives: &BTreeMap<String, f64>,
    weights: &WeightTable,
) -> Result<AggregateResult, EngineError> {
    let mut inflation = Vec::new();
    let mut contributions = Vec::new();
    let mut unscaled_groups = Vec::new();

    for group in weights.groups() {
        let sum = weights.group_sum(group);
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::WeightImbalance {
                group: group.to_string(),
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }

        let mut log_sum = 0.0;
        let mut naive = Vec::new();
        for row in weights.group_rows(group) {
            let relative = relatives.get(&row.category).copied().ok_or_else(|| {
                EngineError::MissingCategory {
                    group: group.to_string(),
                    category: row.category.clone(),
                }
            })?;
            let log_rel = relative.ln();
            log_sum += row.weight * log_rel;
            naive.push((row.category.clone(), 100.0 * row.weight * log_rel));
        }

        let inflation_pct = 100.0 * (log_sum.exp() - 1.0);

        // Rescale the first-order contributions so they close on the exact
        // exponential total.
        let naive_sum: f64 = naive.iter().map(|(_, v)| v).sum();
        let rescale = if naive_sum != 0.0 {
            inflation_pct / naive_sum
        } else {
            log::warn!(
                "group {group}: naive contribution sum is zero, emitting unscaled contributions"
            );
            unscaled_groups.push(group.to_string());
            1.0
        };

        for (category, value) in naive {
            contributions.push(CategoryContribution {
                group: group.to_string(),
                category,
                contribution_pct: value * rescale,
            });
        }
        inflation.push(GroupInflation {
            group: group.to_string(),
            inflation_pct,
        });
    }

    Ok(AggregateResult {
        inflation,
        contributions,
        unscaled_groups,
    })
}

/// Post-hoc sanity check: every group's contributions sum to its reported
/// inflation within [`CONTRIBUTION_TOLERANCE`].
///
/// Groups flagged as unscaled are exempt — their closure failure is already
/// surfaced by the flag.
pub fn validate_contribution_closure(result: &AggregateResult) -> Result<(), EngineError> {
    for group_inflation in &result.inflation {
        let group = &group_inflation.group;
        if result.unscaled_groups.contains(group) {
            continue;
        }
        let sum: f64 = result
            .contributions
            .iter()
            .filter(|c| &c.group == group)
            .map(|c| c.contribution_pct)
            .sum();
        if (sum - group_inflation.inflation_pct).abs() > CONTRIBUTION_TOLERANCE {
            return Err(EngineError::ContributionMismatch {
                group: group.clone(),
                sum,
                inflation: group_inflation.inflation_pct,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::WeightRow;

    fn weights(rows: &[(&str, &str, f64)]) -> WeightTable {
        WeightTable::new(
            rows.iter()
                .map(|&(g, c, w)| WeightRow {
                    group: g.to_string(),
                    category: c.to_string(),
                    weight: w,
                })
                .collect(),
        )
    }

    fn relatives(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|&(c, v)| (c.to_string(), v)).collect()
    }

    #[test]
    fn worked_example() {
        // relatives 1.05 / 1.01 at weights 0.4 / 0.6 give ≈ 2.582% inflation.
        let rel = relatives(&[("A", 1.05), ("B", 1.01)]);
        let w = weights(&[("G1", "A", 0.4), ("G1", "B", 0.6)]);
        let result = aggregate_inflation(&rel, &w).unwrap();

        let pct = result.inflation_for("G1").unwrap();
        assert!((pct - 2.582).abs() < 1e-3, "got {pct}");

        let contrib_sum: f64 = result
            .contributions
            .iter()
            .map(|c| c.contribution_pct)
            .sum();
        assert!((contrib_sum - pct).abs() < 1e-9);
        assert!(result.unscaled_groups.is_empty());
        validate_contribution_closure(&result).unwrap();
    }

    #[test]
    fn weight_imbalance_fails_before_arithmetic() {
        // Relatives map is empty: if validation did not run first, the lookup
        // would fail with MissingCategory instead.
        let rel = BTreeMap::new();
        let w = weights(&[("Q1", "A", 0.3), ("Q1", "B", 0.3)]);
        match aggregate_inflation(&rel, &w) {
            Err(EngineError::WeightImbalance { group, sum, .. }) => {
                assert_eq!(group, "Q1");
                assert!((sum - 0.6).abs() < 1e-12);
            }
            other => panic!("expected WeightImbalance, got {other:?}"),
        }
    }

    #[test]
    fn missing_category_names_group_and_category() {
        let rel = relatives(&[("A", 1.02)]);
        let w = weights(&[("Q1", "A", 0.5), ("Q1", "B", 0.5)]);
        assert_eq!(
            aggregate_inflation(&rel, &w).unwrap_err(),
            EngineError::MissingCategory {
                group: "Q1".to_string(),
                category: "B".to_string(),
            }
        );
    }

    #[test]
    fn category_agnostic() {
        // Never-before-seen labels must work identically.
        let rel = relatives(&[("zz_widget_7", 1.05), ("qq_gadget_3", 1.01)]);
        let w = weights(&[
            ("segment_x", "zz_widget_7", 0.4),
            ("segment_x", "qq_gadget_3", 0.6),
        ]);
        let result = aggregate_inflation(&rel, &w).unwrap();
        let pct = result.inflation_for("segment_x").unwrap();
        assert!((pct - 2.582).abs() < 1e-3);
    }

    #[test]
    fn multiple_groups_keep_input_order() {
        let rel = relatives(&[("A", 1.02), ("B", 1.04)]);
        let w = weights(&[
            ("Q2", "A", 0.5),
            ("Q2", "B", 0.5),
            ("Q1", "A", 1.0),
        ]);
        let result = aggregate_inflation(&rel, &w).unwrap();
        let order: Vec<&str> = result.inflation.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(order, vec!["Q2", "Q1"]);
    }

    #[test]
    fn zero_change_group_is_flagged_unscaled() {
        // All relatives exactly 1.0: every log relative is zero, so the naive
        // sum is zero and the rescale is degenerate.
        let rel = relatives(&[("A", 1.0), ("B", 1.0)]);
        let w = weights(&[("Q1", "A", 0.5), ("Q1", "B", 0.5)]);
        let result = aggregate_inflation(&rel, &w).unwrap();
        assert_eq!(result.inflation_for("Q1").unwrap(), 0.0);
        assert_eq!(result.unscaled_groups, vec!["Q1".to_string()]);
        // Closure check exempts the flagged group.
        validate_contribution_closure(&result).unwrap();
    }

    #[test]
    fn closure_check_detects_tampered_contributions() {
        let rel = relatives(&[("A", 1.05), ("B", 1.01)]);
        let w = weights(&[("G1", "A", 0.4), ("G1", "B", 0.6)]);
        let mut result = aggregate_inflation(&rel, &w).unwrap();
        result.contributions[0].contribution_pct += 0.5;
        assert!(matches!(
            validate_contribution_closure(&result),
            Err(EngineError::ContributionMismatch { .. })
        ));
    }
}
