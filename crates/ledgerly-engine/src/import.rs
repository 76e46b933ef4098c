//! # Typed Import
//!
//! Applies pre-parsed rows through the engines, collecting per-row failures
//! instead of aborting the batch.
//!
//! CSV (or any other format) is parsed by the caller; this module only sees
//! typed rows. That keeps file formats out of the business layer and makes
//! the import path testable without fixtures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::billing::BillingEngine;
use crate::error::EngineResult;
use crate::stock::{StockAdjustment, StockEngine};
use ledgerly_db::Database;

// =============================================================================
// Row Types
// =============================================================================

/// A sale to record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRow {
    pub item: String,
    pub qty: i64,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A stock entry to create or top up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    pub item: String,
    pub qty: i64,
    pub threshold: i64,
    pub unit_cost_cents: i64,
}

/// An expense to record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub category: String,
    pub vendor: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Report
// =============================================================================

/// Outcome of an import batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows applied successfully.
    pub applied: usize,

    /// Failed rows as (zero-based row index, failure message).
    pub skipped: Vec<(usize, String)>,
}

impl ImportReport {
    /// True when every row applied.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Domain rejections become skipped rows; storage failures abort the
    /// batch, since the rest of it would fail the same way.
    fn record(&mut self, index: usize, result: EngineResult<()>) -> EngineResult<()> {
        match result {
            Ok(()) => {
                self.applied += 1;
                Ok(())
            }
            Err(e) if e.is_domain_error() => {
                warn!(row = index, error = %e, "Import row skipped");
                self.skipped.push((index, e.to_string()));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Importer
// =============================================================================

/// Applies typed import rows through the billing and stock engines.
#[derive(Debug, Clone)]
pub struct Importer {
    billing: BillingEngine,
    stock: StockEngine,
}

impl Importer {
    /// Creates a new Importer.
    pub fn new(db: Database) -> Self {
        Importer {
            billing: BillingEngine::new(db.clone()),
            stock: StockEngine::new(db),
        }
    }

    /// Records each sale row; a row that fails (unknown item, insufficient
    /// stock, bad quantity) is skipped and reported, the rest still apply.
    pub async fn apply_sales(&self, rows: &[SaleRow]) -> EngineResult<ImportReport> {
        let mut report = ImportReport::default();

        for (index, row) in rows.iter().enumerate() {
            let result = self
                .billing
                .record_sale(
                    &row.item,
                    row.qty,
                    row.unit_price_cents,
                    &row.customer,
                    row.date,
                )
                .await
                .map(|_| ());
            report.record(index, result)?;
        }

        info!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "Sales import finished"
        );
        Ok(report)
    }

    /// Creates or tops up each inventory row as a restock.
    pub async fn apply_inventory(&self, rows: &[InventoryRow]) -> EngineResult<ImportReport> {
        let mut report = ImportReport::default();

        for (index, row) in rows.iter().enumerate() {
            let result = self
                .stock
                .adjust(
                    &row.item,
                    row.qty,
                    StockAdjustment::Restock {
                        threshold: row.threshold,
                        unit_cost_cents: row.unit_cost_cents,
                    },
                )
                .await
                .map(|_| ());
            report.record(index, result)?;
        }

        info!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "Inventory import finished"
        );
        Ok(report)
    }

    /// Records each expense row.
    pub async fn apply_expenses(&self, rows: &[ExpenseRow]) -> EngineResult<ImportReport> {
        let mut report = ImportReport::default();

        for (index, row) in rows.iter().enumerate() {
            let result = self
                .billing
                .record_expense(
                    &row.category,
                    &row.vendor,
                    row.amount_cents,
                    row.date,
                    row.notes.clone(),
                )
                .await
                .map(|_| ());
            report.record(index, result)?;
        }

        info!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "Expense import finished"
        );
        Ok(report)
    }

}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_db::DbConfig;

    async fn setup() -> (Database, Importer) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db.clone(), Importer::new(db))
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn inventory(item: &str, qty: i64, threshold: i64) -> InventoryRow {
        InventoryRow {
            item: item.to_string(),
            qty,
            threshold,
            unit_cost_cents: 4000,
        }
    }

    fn sale(item: &str, qty: i64, unit_price_cents: i64) -> SaleRow {
        SaleRow {
            item: item.to_string(),
            qty,
            unit_price_cents,
            customer: String::new(),
            date: Some(date(15)),
        }
    }

    #[tokio::test]
    async fn test_inventory_then_sales_import() {
        let (db, importer) = setup().await;

        let report = importer
            .apply_inventory(&[inventory("Sugar", 100, 10), inventory("Rice", 50, 5)])
            .await
            .unwrap();
        assert_eq!(report.applied, 2);
        assert!(report.is_clean());

        let report = importer
            .apply_sales(&[sale("Sugar", 2, 5000), sale("Rice", 1, 6000)])
            .await
            .unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(db.sales().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bad_rows_skip_without_aborting_batch() {
        let (db, importer) = setup().await;
        importer
            .apply_inventory(&[inventory("Sugar", 10, 5)])
            .await
            .unwrap();

        let report = importer
            .apply_sales(&[
                sale("Sugar", 2, 5000),
                sale("Ghost", 1, 1000),  // unknown item
                sale("Sugar", 0, 5000),  // bad quantity
                sale("Sugar", 50, 5000), // insufficient stock
                sale("Sugar", 1, 5000),
            ])
            .await
            .unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped.len(), 3);
        let skipped_rows: Vec<usize> = report.skipped.iter().map(|(i, _)| *i).collect();
        assert_eq!(skipped_rows, vec![1, 2, 3]);
        assert!(!report.is_clean());

        assert_eq!(db.sales().count().await.unwrap(), 2);
        let sugar = db.stock().get_by_item("Sugar").await.unwrap().unwrap();
        assert_eq!(sugar.qty, 7);
    }

    #[tokio::test]
    async fn test_expense_import_reports_invalid_amounts() {
        let (db, importer) = setup().await;

        let rows = vec![
            ExpenseRow {
                category: "fuel".to_string(),
                vendor: "A".to_string(),
                amount_cents: 3000,
                date: Some(date(1)),
                notes: None,
            },
            ExpenseRow {
                category: "rent".to_string(),
                vendor: "B".to_string(),
                amount_cents: 0,
                date: Some(date(1)),
                notes: None,
            },
        ];

        let report = importer.apply_expenses(&rows).await.unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(db.expenses().count().await.unwrap(), 1);
    }
}
