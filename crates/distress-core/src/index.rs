//! Composite stress index formula.

use serde::{Deserialize, Serialize};

use crate::inflation::GroupInflation;

/// Tunable parameters of the index formula.
///
/// `index = scale · (alpha · inflation + (1 − alpha) · slack)`. The defaults
/// are the reference methodology; callers may override both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndexParams {
    /// Weight on inflation versus slack, in [0, 1].
    pub alpha: f64,
    /// Overall scale factor.
    pub scale: f64,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            scale: 2.0,
        }
    }
}

/// One group's composite index value with its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexRecord {
    pub group: String,
    pub index: f64,
    pub inflation_pct: f64,
    /// Shared across all groups in one invocation.
    pub slack: f64,
}

/// Combine each group's inflation with the shared slack scalar.
///
/// Pure and total: the formula is applied verbatim to every group.
pub fn compose_index(
    inflation: &[GroupInflation],
    slack: f64,
    params: &IndexParams,
) -> Vec<IndexRecord> {
    inflation
        .iter()
        .map(|g| IndexRecord {
            group: g.group.clone(),
            index: params.scale * (params.alpha * g.inflation_pct + (1.0 - params.alpha) * slack),
            inflation_pct: g.inflation_pct,
            slack,
        })
        .collect()
}
