//! Record validation: the only gate between raw CSV rows and aggregation.

use dashboard_core::models::{RawRecord, ValidRecord};
use tracing::debug;

/// Keep rows that carry a brand and a numeric sell-through value.
///
/// Rejected rows are dropped silently; only a debug-level count is logged.
/// Accepted rows come back with every numeric field already resolved through
/// the defaults in [`dashboard_core::coercion`].
pub fn filter_valid(rows: &[RawRecord]) -> Vec<ValidRecord> {
    let valid: Vec<ValidRecord> = rows.iter().filter_map(ValidRecord::from_raw).collect();

    let dropped = rows.len() - valid.len();
    if dropped > 0 {
        debug!("Dropped {} of {} rows without a brand or numeric sell-through", dropped, rows.len());
    }

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::FieldValue;

    fn row(brand: FieldValue, sell_through: FieldValue) -> RawRecord {
        RawRecord {
            brand,
            sell_through_pct: sell_through,
            ..Default::default()
        }
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_filter_keeps_valid_rows_in_order() {
        let rows = vec![
            row(text("A"), FieldValue::Number(80.0)),
            row(text("B"), FieldValue::Number(70.0)),
        ];
        let valid = filter_valid(&rows);
        let brands: Vec<&str> = valid.iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(brands, vec!["A", "B"]);
    }

    #[test]
    fn test_filter_drops_missing_brand() {
        let rows = vec![
            row(FieldValue::Empty, FieldValue::Number(80.0)),
            row(text(""), FieldValue::Number(80.0)),
            row(text("A"), FieldValue::Number(80.0)),
        ];
        assert_eq!(filter_valid(&rows).len(), 1);
    }

    #[test]
    fn test_filter_drops_non_numeric_sell_through() {
        let rows = vec![
            row(text("A"), text("n/a")),
            row(text("A"), FieldValue::Empty),
            row(text("A"), text("NaN")),
            row(text("A"), FieldValue::Number(55.5)),
        ];
        let valid = filter_valid(&rows);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].sell_through_pct, 55.5);
    }

    #[test]
    fn test_filter_all_invalid_is_empty() {
        let rows = vec![row(FieldValue::Empty, text("x"))];
        assert!(filter_valid(&rows).is_empty());
    }

    #[test]
    fn test_filter_numeric_brand_becomes_text() {
        let rows = vec![row(FieldValue::Number(42.0), FieldValue::Number(60.0))];
        let valid = filter_valid(&rows);
        assert_eq!(valid[0].brand, "42");
    }
}
