//! # Billing Engine
//!
//! Records sales and expenses.
//!
//! ## Sale Recording
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  record_sale(item, qty, unit_price, customer, date?)                │
//! │                                                                     │
//! │  1. Validate   qty > 0, unit_price >= 0, item non-empty             │
//! │  2. BEGIN                                                           │
//! │  3.   look up stock          → UnknownItem                          │
//! │  4.   check availability     → InsufficientStock                    │
//! │  5.   decrement stock                                               │
//! │  6.   bump receipt counter                                          │
//! │  7.   insert sale row                                               │
//! │  8. COMMIT                                                          │
//! │                                                                     │
//! │  Any failure before COMMIT rolls everything back: no sale row,      │
//! │  no stock change, no consumed receipt number.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use ledgerly_core::{
    stock, validation, Expense, LedgerError, Money, Sale, StockStatus,
};
use ledgerly_db::{Database, DbError, SaleRepository, StockRepository};

/// Result of a recorded sale.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    /// The persisted sale, receipt number included.
    pub sale: Sale,

    /// Stock status of the item after the decrement.
    pub stock_status: StockStatus,
}

/// Engine for recording sales and expenses.
#[derive(Debug, Clone)]
pub struct BillingEngine {
    db: Database,
}

impl BillingEngine {
    /// Creates a new BillingEngine.
    pub fn new(db: Database) -> Self {
        BillingEngine { db }
    }

    /// Records a sale: decrements stock, allocates a receipt number and
    /// persists the sale row, all in one transaction.
    ///
    /// `date` defaults to today. An empty `customer` becomes the walk-in
    /// placeholder.
    pub async fn record_sale(
        &self,
        item: &str,
        qty: i64,
        unit_price_cents: i64,
        customer: &str,
        date: Option<NaiveDate>,
    ) -> EngineResult<SaleOutcome> {
        let item = validation::validate_item_name(item).map_err(LedgerError::from)?;
        validation::validate_quantity(qty).map_err(|e| LedgerError::InvalidSale {
            reason: e.to_string(),
        })?;
        validation::validate_unit_price_cents(unit_price_cents).map_err(|e| {
            LedgerError::InvalidSale {
                reason: e.to_string(),
            }
        })?;

        let customer = validation::normalize_customer(customer);
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        let mut tx = self.db.begin().await?;

        let stock_item = StockRepository::get_by_item_conn(&mut tx, &item)
            .await?
            .ok_or_else(|| LedgerError::UnknownItem(item.clone()))?;

        if stock_item.qty < qty {
            return Err(LedgerError::InsufficientStock {
                item: stock_item.item,
                available: stock_item.qty,
                requested: qty,
            }
            .into());
        }

        StockRepository::apply_delta_conn(&mut tx, &item, -qty, date).await?;
        let receipt_number = SaleRepository::next_receipt_number_conn(&mut tx).await?;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            receipt_number,
            item: stock_item.item.clone(),
            qty,
            unit_price_cents,
            total_cents: Money::from_cents(unit_price_cents)
                .multiply_quantity(qty)
                .cents(),
            customer,
            date,
        };
        SaleRepository::insert_conn(&mut tx, &sale).await?;

        tx.commit().await.map_err(DbError::from)?;

        let stock_status = stock::classify(stock_item.qty - qty, stock_item.threshold);
        if stock_status.needs_alert() {
            warn!(
                item = %sale.item,
                remaining = stock_item.qty - qty,
                threshold = stock_item.threshold,
                status = %stock_status,
                "Item low after sale"
            );
        }

        info!(
            receipt_number = sale.receipt_number,
            item = %sale.item,
            total_cents = sale.total_cents,
            "Sale recorded"
        );

        Ok(SaleOutcome { sale, stock_status })
    }

    /// Records an expense. `date` defaults to today.
    pub async fn record_expense(
        &self,
        category: &str,
        vendor: &str,
        amount_cents: i64,
        date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> EngineResult<Expense> {
        validation::validate_amount_cents(amount_cents)
            .map_err(|_| LedgerError::InvalidAmount { amount_cents })?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            category: category.trim().to_lowercase(),
            vendor: vendor.trim().to_string(),
            amount_cents,
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            notes,
        };
        self.db.expenses().insert(&expense).await?;

        info!(
            category = %expense.category,
            amount_cents = expense.amount_cents,
            "Expense recorded"
        );
        Ok(expense)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::{StockAdjustment, StockEngine};
    use ledgerly_db::DbConfig;

    async fn setup() -> (Database, BillingEngine) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db.clone(), BillingEngine::new(db))
    }

    async fn stock(db: &Database, item: &str, qty: i64, threshold: i64) {
        StockEngine::new(db.clone())
            .adjust(
                item,
                qty,
                StockAdjustment::Restock {
                    threshold,
                    unit_cost_cents: 4000,
                },
            )
            .await
            .unwrap();
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_record_sale_happy_path() {
        let (db, billing) = setup().await;
        stock(&db, "Sugar", 100, 10).await;

        let outcome = billing
            .record_sale("Sugar", 2, 5000, "John", Some(date(15)))
            .await
            .unwrap();

        assert_eq!(outcome.sale.receipt_number, 1);
        assert_eq!(outcome.sale.total_cents, 10000);
        assert_eq!(outcome.sale.customer, "John");
        assert_eq!(outcome.stock_status, StockStatus::Ok);

        let remaining = db.stock().get_by_item("Sugar").await.unwrap().unwrap();
        assert_eq!(remaining.qty, 98);
    }

    #[tokio::test]
    async fn test_empty_customer_becomes_walk_in() {
        let (db, billing) = setup().await;
        stock(&db, "Tea", 10, 2).await;

        let outcome = billing
            .record_sale("Tea", 1, 1000, "  ", Some(date(1)))
            .await
            .unwrap();
        assert_eq!(outcome.sale.customer, "Walk-in");
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected() {
        let (db, billing) = setup().await;
        stock(&db, "Tea", 10, 2).await;

        let err = billing.record_sale("Tea", 0, 1000, "", None).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::InvalidSale { .. }))
        ));

        let err = billing.record_sale("Tea", 1, -5, "", None).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::InvalidSale { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let (_db, billing) = setup().await;
        let err = billing.record_sale("Ghost", 1, 1000, "", None).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::UnknownItem(_)))
        ));
    }

    #[tokio::test]
    async fn test_failed_sale_leaves_no_trace() {
        let (db, billing) = setup().await;
        stock(&db, "Rice", 3, 1).await;

        let err = billing.record_sale("Rice", 5, 6000, "Mary", None).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(
                LedgerError::InsufficientStock { available: 3, requested: 5, .. }
            ))
        ));

        // No sale row, no stock change, no consumed receipt number
        assert_eq!(db.sales().count().await.unwrap(), 0);
        let rice = db.stock().get_by_item("Rice").await.unwrap().unwrap();
        assert_eq!(rice.qty, 3);

        let ok = billing
            .record_sale("Rice", 1, 6000, "Mary", Some(date(2)))
            .await
            .unwrap();
        assert_eq!(ok.sale.receipt_number, 1);
    }

    #[tokio::test]
    async fn test_receipt_numbers_increase_across_sales() {
        let (db, billing) = setup().await;
        stock(&db, "Sugar", 100, 10).await;

        for expected in 1..=3 {
            let outcome = billing
                .record_sale("Sugar", 1, 5000, "", Some(date(1)))
                .await
                .unwrap();
            assert_eq!(outcome.sale.receipt_number, expected);
        }
    }

    #[tokio::test]
    async fn test_sugar_threshold_scenario() {
        let (db, billing) = setup().await;
        stock(&db, "Sugar", 10, 5).await;

        let first = billing
            .record_sale("Sugar", 3, 5000, "", Some(date(1)))
            .await
            .unwrap();
        assert_eq!(first.stock_status, StockStatus::Ok); // 7 left

        let second = billing
            .record_sale("Sugar", 5, 5000, "", Some(date(1)))
            .await
            .unwrap();
        assert_eq!(second.stock_status, StockStatus::Low); // 2 left

        let third = billing.record_sale("Sugar", 3, 5000, "", Some(date(1))).await;
        assert!(matches!(
            third,
            Err(crate::EngineError::Ledger(
                LedgerError::InsufficientStock { available: 2, requested: 3, .. }
            ))
        ));
        let sugar = db.stock().get_by_item("Sugar").await.unwrap().unwrap();
        assert_eq!(sugar.qty, 2);
    }

    #[tokio::test]
    async fn test_record_expense() {
        let (db, billing) = setup().await;

        let expense = billing
            .record_expense(" Fuel ", "City Fuel Station", 3500, Some(date(10)), None)
            .await
            .unwrap();
        assert_eq!(expense.category, "fuel");
        assert_eq!(expense.amount_cents, 3500);
        assert_eq!(db.expenses().count().await.unwrap(), 1);

        let err = billing.record_expense("rent", "X", 0, None, None).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::InvalidAmount { amount_cents: 0 }))
        ));
    }
}
