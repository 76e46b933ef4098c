//! # Stock Classification
//!
//! Pure stock math: classification against the low-stock threshold and the
//! ordering rule for low-stock reports. The quantity mutations themselves
//! live behind the database transaction in the engine layer; this module
//! only ever computes.

use crate::types::{StockItem, StockStatus};

// =============================================================================
// Classification
// =============================================================================

/// Classifies a quantity against a low-stock threshold.
///
/// Total over every (qty, threshold) pair:
///
/// | condition            | status |
/// |----------------------|--------|
/// | qty == 0             | Out    |
/// | 0 < qty <= threshold | Low    |
/// | qty > threshold      | Ok     |
///
/// With `threshold == 0` an item is either Out (qty 0) or Ok; there is no
/// Low band, which matches "never alert until it's gone".
///
/// ## Example
/// ```rust
/// use ledgerly_core::stock::classify;
/// use ledgerly_core::types::StockStatus;
///
/// assert_eq!(classify(7, 5), StockStatus::Ok);
/// assert_eq!(classify(2, 5), StockStatus::Low);
/// assert_eq!(classify(0, 5), StockStatus::Out);
/// ```
#[inline]
pub fn classify(qty: i64, threshold: i64) -> StockStatus {
    if qty == 0 {
        StockStatus::Out
    } else if qty <= threshold {
        StockStatus::Low
    } else {
        StockStatus::Ok
    }
}

// =============================================================================
// Low-Stock Report Ordering
// =============================================================================

/// Filters to Low/Out items and orders them most-urgent-first:
/// ascending quantity, ties broken by item name ascending.
///
/// The single definition of the report rule; the engine applies it to the
/// repository's full listing, and callers can re-derive the report from any
/// in-memory snapshot the same way.
pub fn low_stock_report(items: Vec<StockItem>) -> Vec<StockItem> {
    let mut low: Vec<StockItem> = items
        .into_iter()
        .filter(|i| i.status().needs_alert())
        .collect();
    low.sort_by(|a, b| a.qty.cmp(&b.qty).then_with(|| a.item.cmp(&b.item)));
    low
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(name: &str, qty: i64, threshold: i64) -> StockItem {
        StockItem {
            id: format!("id-{name}"),
            item: name.to_string(),
            qty,
            threshold,
            unit_cost_cents: 100,
            last_updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_classify_is_total() {
        // Exactly one status for every pair, and Out iff qty == 0
        for qty in 0..=10 {
            for threshold in 0..=10 {
                let status = classify(qty, threshold);
                assert_eq!(status == StockStatus::Out, qty == 0);
                if qty > 0 {
                    assert_eq!(status == StockStatus::Low, qty <= threshold);
                    assert_eq!(status == StockStatus::Ok, qty > threshold);
                }
            }
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(6, 5), StockStatus::Ok);
        assert_eq!(classify(5, 5), StockStatus::Low);
        assert_eq!(classify(1, 5), StockStatus::Low);
        assert_eq!(classify(0, 5), StockStatus::Out);
        // threshold 0: no Low band
        assert_eq!(classify(1, 0), StockStatus::Ok);
        assert_eq!(classify(0, 0), StockStatus::Out);
    }

    #[test]
    fn test_low_stock_report_ordering() {
        let items = vec![
            item("Sugar", 2, 5),
            item("Rice", 0, 5),
            item("Tea", 200, 20),  // healthy, excluded
            item("Beans", 2, 10),  // same qty as Sugar, name breaks the tie
        ];

        let report = low_stock_report(items);
        let names: Vec<&str> = report.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Beans", "Sugar"]);
    }

    #[test]
    fn test_low_stock_report_empty_when_all_healthy() {
        let report = low_stock_report(vec![item("Tea", 50, 20)]);
        assert!(report.is_empty());
    }
}
