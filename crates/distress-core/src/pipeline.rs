//! End-to-end deterministic pipeline for one reference period.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::index::{IndexParams, IndexRecord, compose_index};
use crate::inflation::{CategoryContribution, GroupInflation, aggregate_inflation};
use crate::period::period_back;
use crate::relatives::price_relatives;
use crate::slack::resolve_slack;
use crate::summary::{SummaryBounds, SummaryMetrics, summarize};
use crate::table::{PriceLevelTable, SlackSeries, WeightTable};

/// Inputs shared by a snapshot computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotConfig {
    pub horizon_months: u32,
    pub geography: String,
    pub params: IndexParams,
    pub bounds: SummaryBounds,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            horizon_months: crate::period::DEFAULT_HORIZON_MONTHS,
            geography: "US".to_string(),
            params: IndexParams::default(),
            bounds: SummaryBounds::default(),
        }
    }
}

/// Complete deterministic output for one reference period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub reference_period: String,
    pub base_period: String,
    pub slack: f64,
    pub inflation: Vec<GroupInflation>,
    pub contributions: Vec<CategoryContribution>,
    pub index: Vec<IndexRecord>,
    pub summary: SummaryMetrics,
    /// Groups whose contribution breakdown was emitted unscaled (degenerate
    /// zero log-change case).
    pub unscaled_groups: Vec<String>,
}

/// Run relatives → aggregation → slack → index → summary in one call.
///
/// Identical inputs yield bitwise-identical snapshots; nothing here touches
/// a clock, the filesystem, or random state.
pub fn compute_snapshot(
    prices: &PriceLevelTable,
    weights: &WeightTable,
    slack_series: &SlackSeries,
    reference_period: &str,
    cfg: &SnapshotConfig,
) -> Result<Snapshot, EngineError> {
    let base_period = period_back(reference_period, cfg.horizon_months)?;
    let relatives = price_relatives(prices, reference_period, &base_period)?;
    let aggregate = aggregate_inflation(&relatives, weights)?;
    let slack = resolve_slack(slack_series, reference_period, &cfg.geography)?;
    let index = compose_index(&aggregate.inflation, slack, &cfg.params);
    let summary = summarize(&index, &cfg.bounds);

    Ok(Snapshot {
        reference_period: reference_period.to_string(),
        base_period,
        slack,
        inflation: aggregate.inflation,
        contributions: aggregate.contributions,
        index,
        summary,
        unscaled_groups: aggregate.unscaled_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PriceRow, SlackRow, WeightRow};

    fn prices() -> PriceLevelTable {
        PriceLevelTable::from_rows(vec![
            PriceRow {
                period: "2023-11".to_string(),
                levels: [("A".to_string(), 100.0), ("B".to_string(), 200.0)].into(),
            },
            PriceRow {
                period: "2024-11".to_string(),
                levels: [("A".to_string(), 105.0), ("B".to_string(), 202.0)].into(),
            },
        ])
        .unwrap()
    }

    fn weights() -> WeightTable {
        WeightTable::new(vec![
            WeightRow {
                group: "Q1".to_string(),
                category: "A".to_string(),
                weight: 0.4,
            },
            WeightRow {
                group: "Q1".to_string(),
                category: "B".to_string(),
                weight: 0.6,
            },
            WeightRow {
                group: "Q5".to_string(),
                category: "A".to_string(),
                weight: 0.2,
            },
            WeightRow {
                group: "Q5".to_string(),
                category: "B".to_string(),
                weight: 0.8,
            },
        ])
    }

    fn slack() -> SlackSeries {
        SlackSeries::new(vec![SlackRow {
            period: "2024-11".to_string(),
            geography: Some("US".to_string()),
            value: 4.2,
        }])
    }

    #[test]
    fn snapshot_end_to_end() {
        let snap = compute_snapshot(
            &prices(),
            &weights(),
            &slack(),
            "2024-11",
            &SnapshotConfig::default(),
        )
        .unwrap();

        assert_eq!(snap.base_period, "2023-11");
        assert_eq!(snap.slack, 4.2);
        assert_eq!(snap.index.len(), 2);

        // Q1: inflation ≈ 2.5814, index = 2.0 · (0.5 · π + 0.5 · 4.2)
        let q1 = &snap.index[0];
        assert_eq!(q1.group, "Q1");
        let expected = 2.0 * (0.5 * q1.inflation_pct + 0.5 * 4.2);
        assert_eq!(q1.index, expected);

        // Both boundary labels present, so dispersion is reported.
        assert!(snap.summary.dispersion.is_some());
        assert!(snap.unscaled_groups.is_empty());
    }

    #[test]
    fn snapshot_is_deterministic() {
        let cfg = SnapshotConfig::default();
        let a = compute_snapshot(&prices(), &weights(), &slack(), "2024-11", &cfg).unwrap();
        let b = compute_snapshot(&prices(), &weights(), &slack(), "2024-11", &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_base_period_propagates() {
        let cfg = SnapshotConfig {
            horizon_months: 24,
            ..SnapshotConfig::default()
        };
        assert_eq!(
            compute_snapshot(&prices(), &weights(), &slack(), "2024-11", &cfg).unwrap_err(),
            EngineError::MissingPeriod {
                period: "2022-11".to_string()
            }
        );
    }
}
