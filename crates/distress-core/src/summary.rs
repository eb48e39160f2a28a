//! Summary and dispersion statistics over group index values.

use serde::{Deserialize, Serialize};

use crate::index::IndexRecord;

/// Boundary group labels of an ordered grouping scheme.
///
/// Dispersion is `value(highest) − value(lowest)`. The defaults name income
/// quintiles; any grouping scheme can substitute its own boundary labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryBounds {
    pub lowest: String,
    pub highest: String,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            lowest: "Q1".to_string(),
            highest: "Q5".to_string(),
        }
    }
}

/// Distribution summary of the per-group index values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryMetrics {
    pub median: f64,
    pub max: f64,
    /// `index(highest) − index(lowest)`; absent (not zero) when either
    /// boundary label is missing from the records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<f64>,
}

/// Summarize index values across groups.
///
/// Median and maximum are taken over all records; dispersion only when both
/// boundary labels are present. Empty input yields NaN statistics.
pub fn summarize(records: &[IndexRecord], bounds: &SummaryBounds) -> SummaryMetrics {
    let mut values: Vec<f64> = records.iter().map(|r| r.index).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = if values.is_empty() {
        f64::NAN
    } else {
        let n = values.len();
        if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        }
    };
    let max = values.last().copied().unwrap_or(f64::NAN);

    let index_of = |group: &str| {
        records
            .iter()
            .find(|r| r.group == group)
            .map(|r| r.index)
    };
    let dispersion = match (index_of(&bounds.lowest), index_of(&bounds.highest)) {
        (Some(lowest), Some(highest)) => Some(highest - lowest),
        _ => None,
    };

    SummaryMetrics {
        median,
        max,
        dispersion,
    }
}
