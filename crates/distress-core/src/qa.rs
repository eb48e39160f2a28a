//! Quality-assurance gate checks over a computed snapshot.
//!
//! Hard checks must pass before a snapshot is fit for release; soft checks
//! flag unusual but not necessarily wrong results. Checks re-verify structure
//! the pipeline already enforced — they run on the output, not the inputs,
//! so a serialization or handling bug between computation and release is
//! still caught.

use serde::{Deserialize, Serialize};

use crate::pipeline::Snapshot;
use crate::summary::SummaryBounds;
use crate::table::{WEIGHT_SUM_TOLERANCE, WeightTable};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// One QA check result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QaCheck {
    pub id: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl QaCheck {
    fn pass(id: &'static str, message: String) -> Self {
        Self {
            id,
            status: CheckStatus::Pass,
            message,
        }
    }

    fn warn(id: &'static str, message: String) -> Self {
        Self {
            id,
            status: CheckStatus::Warn,
            message,
        }
    }

    fn fail(id: &'static str, message: String) -> Self {
        Self {
            id,
            status: CheckStatus::Fail,
            message,
        }
    }
}

/// Hard checks: group coverage, plausible value range, weight sums.
///
/// `plausible` is the inclusive index-value range considered publishable.
pub fn hard_checks(
    snapshot: &Snapshot,
    weights: &WeightTable,
    expected_groups: &[String],
    plausible: (f64, f64),
) -> Vec<QaCheck> {
    let mut checks = Vec::new();

    let missing: Vec<&String> = expected_groups
        .iter()
        .filter(|g| !snapshot.index.iter().any(|r| &r.group == *g))
        .collect();
    if missing.is_empty() {
        checks.push(QaCheck::pass(
            "ALL_GROUPS_PRESENT",
            format!("all {} expected groups present", expected_groups.len()),
        ));
    } else {
        checks.push(QaCheck::fail(
            "ALL_GROUPS_PRESENT",
            format!("missing groups: {missing:?}"),
        ));
    }

    let (lo, hi) = plausible;
    let out_of_range: Vec<String> = snapshot
        .index
        .iter()
        .filter(|r| !(lo..=hi).contains(&r.index))
        .map(|r| format!("{}={:.2}", r.group, r.index))
        .collect();
    if out_of_range.is_empty() {
        checks.push(QaCheck::pass(
            "INDEX_VALUES_IN_RANGE",
            format!("all index values within [{lo}, {hi}]"),
        ));
    } else {
        checks.push(QaCheck::fail(
            "INDEX_VALUES_IN_RANGE",
            format!("values outside [{lo}, {hi}]: {}", out_of_range.join(", ")),
        ));
    }

    match weights.validate() {
        Ok(()) => checks.push(QaCheck::pass(
            "WEIGHT_SUMS_VALID",
            format!("every group's weights sum to 1.0 \u{b1} {WEIGHT_SUM_TOLERANCE}"),
        )),
        Err(err) => checks.push(QaCheck::fail("WEIGHT_SUMS_VALID", err.to_string())),
    }

    if snapshot.unscaled_groups.is_empty() {
        checks.push(QaCheck::pass(
            "CONTRIBUTION_CLOSURE",
            "contribution breakdowns close on group totals".to_string(),
        ));
    } else {
        checks.push(QaCheck::fail(
            "CONTRIBUTION_CLOSURE",
            format!(
                "unscaled contribution breakdowns for groups: {:?}",
                snapshot.unscaled_groups
            ),
        ));
    }

    checks
}

/// Soft checks: the distributional gradient typically runs lowest-boundary
/// group at or above highest-boundary group.
pub fn soft_checks(snapshot: &Snapshot, bounds: &SummaryBounds) -> Vec<QaCheck> {
    let mut checks = Vec::new();

    let index_of = |group: &str| snapshot.index.iter().find(|r| r.group == group);
    if let (Some(lowest), Some(highest)) = (index_of(&bounds.lowest), index_of(&bounds.highest)) {
        if lowest.index >= highest.index {
            checks.push(QaCheck::pass(
                "DISTRIBUTIONAL_GRADIENT",
                format!(
                    "expected pattern: {} ({:.2}) >= {} ({:.2})",
                    bounds.lowest, lowest.index, bounds.highest, highest.index
                ),
            ));
        } else {
            checks.push(QaCheck::warn(
                "DISTRIBUTIONAL_GRADIENT",
                format!(
                    "unusual pattern: {} ({:.2}) > {} ({:.2}), verify inputs",
                    bounds.highest, highest.index, bounds.lowest, lowest.index
                ),
            ));
        }
    }

    checks
}

/// A snapshot clears the gate when no check failed. Warnings pass.
pub fn release_gate(checks: &[QaCheck]) -> bool {
    checks.iter().all(|c| c.status != CheckStatus::Fail)
}
