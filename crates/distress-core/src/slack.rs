//! Labor-market slack resolution.

use crate::error::EngineError;
use crate::table::SlackSeries;

/// Extract the slack scalar for one period and geography.
///
/// If any row in the series carries a geography identifier the series is
/// filtered to rows matching `geography`; otherwise the whole series is
/// treated as ungrouped and `geography` only labels the error on a miss.
pub fn resolve_slack(
    series: &SlackSeries,
    period: &str,
    geography: &str,
) -> Result<f64, EngineError> {
    let grouped = series.has_geography();
    series
        .rows()
        .iter()
        .find(|row| {
            row.period == period && (!grouped || row.geography.as_deref() == Some(geography))
        })
        .map(|row| row.value)
        .ok_or_else(|| EngineError::MissingSlack {
            period: period.to_string(),
            geography: geography.to_string(),
        })
}
