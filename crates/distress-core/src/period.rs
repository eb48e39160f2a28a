//! Year-month period arithmetic.
//!
//! Periods are `YYYY-MM` strings throughout the engine; the only arithmetic
//! needed is stepping a period back by a horizon of whole months to find the
//! base period of a year-over-year comparison.

use crate::error::EngineError;

/// Default comparison horizon: twelve months (year-over-year).
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Parse a `YYYY-MM` identifier into (year, month).
fn parse_period(period: &str) -> Result<(i32, u32), EngineError> {
    let bad = || EngineError::BadPeriod {
        period: period.to_string(),
    };
    let (year, month) = period.split_once('-').ok_or_else(bad)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(bad());
    }
    let year: i32 = year.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((year, month))
}

/// Step a period back by `months` whole months.
///
/// `period_back("2024-11", 12)` is `"2023-11"`.
pub fn period_back(period: &str, months: u32) -> Result<String, EngineError> {
    let (year, month) = parse_period(period)?;
    let total = year as i64 * 12 + (month as i64 - 1) - months as i64;
    let base_year = total.div_euclid(12);
    let base_month = total.rem_euclid(12) + 1;
    Ok(format!("{base_year:04}-{base_month:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_over_year() {
        assert_eq!(period_back("2024-11", 12).unwrap(), "2023-11");
    }

    #[test]
    fn crosses_year_boundary() {
        assert_eq!(period_back("2024-03", 6).unwrap(), "2023-09");
        assert_eq!(period_back("2024-01", 1).unwrap(), "2023-12");
    }

    #[test]
    fn zero_horizon_is_identity() {
        assert_eq!(period_back("2024-11", 0).unwrap(), "2024-11");
    }

    #[test]
    fn rejects_malformed_periods() {
        for p in ["2024", "2024-13", "24-11", "2024-1", "abcd-ef", ""] {
            assert!(
                matches!(period_back(p, 12), Err(EngineError::BadPeriod { .. })),
                "expected BadPeriod for {p:?}"
            );
        }
    }
}
