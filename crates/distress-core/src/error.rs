//! Structured error types for the calculation engine.
//!
//! Every failure carries the offending group/period/category identifiers and
//! the observed numeric values, so callers can report exactly what went wrong
//! without string matching.

use thiserror::Error;

/// Errors raised by the deterministic calculation engine.
///
/// All variants are fatal to the specific computation attempted; the engine
/// never retries internally and never silently defaults (the one degenerate
/// contribution case is flagged, not hidden — see
/// [`aggregate_inflation`](crate::inflation::aggregate_inflation)).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Requested period has no row in the price level table.
    #[error("no price level data for period {period}")]
    MissingPeriod { period: String },

    /// Requested period/geography has no row in the slack series.
    #[error("no slack data for period {period}, geography {geography}")]
    MissingSlack { period: String, geography: String },

    /// A category required by a weight row is absent from the resolved
    /// price relatives.
    #[error("no price relative for category {category} required by group {group}")]
    MissingCategory { group: String, category: String },

    /// A group's weights do not sum to 1.0 within tolerance.
    #[error("weights for group {group} sum to {sum:.4}, expected 1.0 \u{b1} {tolerance}")]
    WeightImbalance {
        group: String,
        sum: f64,
        tolerance: f64,
    },

    /// Post-hoc check: a group's contributions fail to close on its reported
    /// inflation within tolerance. Never raised by the aggregation itself.
    #[error(
        "contributions for group {group} sum to {sum:.4} but total inflation is {inflation:.4}"
    )]
    ContributionMismatch {
        group: String,
        sum: f64,
        inflation: f64,
    },

    /// Data-integrity violation: a price level that must be strictly positive
    /// is not.
    #[error("non-positive price level {value} for category {category} at period {period}")]
    NonPositiveLevel {
        period: String,
        category: String,
        value: f64,
    },

    /// Two price level rows share the same period key.
    #[error("duplicate period {period} in price level table")]
    DuplicatePeriod { period: String },

    /// A period identifier does not parse as YYYY-MM.
    #[error("malformed period identifier {period:?}, expected YYYY-MM")]
    BadPeriod { period: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_identifiers() {
        let err = EngineError::WeightImbalance {
            group: "Q3".to_string(),
            sum: 0.9421,
            tolerance: 0.001,
        };
        let msg = err.to_string();
        assert!(msg.contains("Q3"));
        assert!(msg.contains("0.9421"));

        let err = EngineError::MissingSlack {
            period: "2024-11".to_string(),
            geography: "US".to_string(),
        };
        assert!(err.to_string().contains("2024-11"));
    }
}
