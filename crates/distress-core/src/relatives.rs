//! Price relative resolution.
//!
//! A price relative is the ratio of a category's index level at the reference
//! period to its level at the base period (typically 12 months earlier).

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::table::PriceLevelTable;

/// Resolve per-category price relatives between two periods.
///
/// For every category present in both the reference and base rows,
/// `relative = level(reference) / level(base)`. Categories present in only
/// one of the two rows are skipped; the aggregator reports a missing-category
/// error if a weight row later requires one of them.
///
/// The table construction guarantees strictly positive levels; a violated
/// invariant (possible only through a corrupted table) is propagated as a
/// data-integrity error rather than a non-finite relative.
pub fn price_relatives(
    table: &PriceLevelTable,
    reference_period: &str,
    base_period: &str,
) -> Result<BTreeMap<String, f64>, EngineError> {
    let reference = table.row(reference_period).ok_or_else(|| EngineError::MissingPeriod {
        period: reference_period.to_string(),
    })?;
    let base = table.row(base_period).ok_or_else(|| EngineError::MissingPeriod {
        period: base_period.to_string(),
    })?;

    let mut relatives = BTreeMap::new();
    for (category, &level_ref) in reference {
        let Some(&level_base) = base.get(category) else {
            continue;
        };
        if !(level_base > 0.0) {
            return Err(EngineError::NonPositiveLevel {
                period: base_period.to_string(),
                category: category.clone(),
                value: level_base,
            });
        }
        relatives.insert(category.clone(), level_ref / level_base);
    }
    Ok(relatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PriceRow;

    fn table() -> PriceLevelTable {
        let rows = vec![
            PriceRow {
                period: "2023-11".to_string(),
                levels: [("A".to_string(), 100.0), ("B".to_string(), 200.0)].into(),
            },
            PriceRow {
                period: "2024-11".to_string(),
                levels: [("A".to_string(), 105.0), ("B".to_string(), 202.0)].into(),
            },
        ];
        PriceLevelTable::from_rows(rows).unwrap()
    }

    #[test]
    fn resolves_relatives() {
        let rel = price_relatives(&table(), "2024-11", "2023-11").unwrap();
        assert!((rel["A"] - 1.05).abs() < 1e-12);
        assert!((rel["B"] - 1.01).abs() < 1e-12);
    }

    #[test]
    fn missing_reference_period() {
        let err = price_relatives(&table(), "2025-01", "2023-11").unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingPeriod {
                period: "2025-01".to_string()
            }
        );
    }

    #[test]
    fn missing_base_period() {
        let err = price_relatives(&table(), "2024-11", "2022-11").unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingPeriod {
                period: "2022-11".to_string()
            }
        );
    }

    #[test]
    fn skips_category_absent_from_base() {
        let rows = vec![
            PriceRow {
                period: "2023-11".to_string(),
                levels: [("A".to_string(), 100.0)].into(),
            },
            PriceRow {
                period: "2024-11".to_string(),
                levels: [("A".to_string(), 102.0), ("NEW".to_string(), 99.0)].into(),
            },
        ];
        let table = PriceLevelTable::from_rows(rows).unwrap();
        let rel = price_relatives(&table, "2024-11", "2023-11").unwrap();
        assert!(rel.contains_key("A"));
        assert!(!rel.contains_key("NEW"));
    }
}
