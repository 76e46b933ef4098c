//! # Stock Engine
//!
//! Stock adjustments and the low-stock report.
//!
//! ## Adjustment Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  adjust(item, delta, reason)                                        │
//! │                                                                     │
//! │  Sale                          Restock { threshold, unit_cost }     │
//! │  ────                          ─────────────────────────────────    │
//! │  • item must exist             • creates the item if absent         │
//! │  • result must stay >= 0       • always succeeds                    │
//! │    (InsufficientStock)         • refreshes threshold + unit cost    │
//! │  • UnknownItem if untracked                                         │
//! │                                                                     │
//! │  Both stamp last_updated.                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use ledgerly_core::{stock, validation, LedgerError, StockItem, StockStatus};
use ledgerly_db::{Database, DbError, StockRepository};

/// Why a stock level is changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// Consumption by a sale: the item must exist and the result must
    /// stay non-negative.
    Sale,

    /// Goods arriving (or an initial entry): creates the item if absent.
    Restock {
        threshold: i64,
        unit_cost_cents: i64,
    },
}

/// Engine for stock levels and alerts.
#[derive(Debug, Clone)]
pub struct StockEngine {
    db: Database,
}

impl StockEngine {
    /// Creates a new StockEngine.
    pub fn new(db: Database) -> Self {
        StockEngine { db }
    }

    /// Applies a signed quantity delta to an item.
    ///
    /// Returns the item as stored after the adjustment.
    pub async fn adjust(
        &self,
        item: &str,
        delta: i64,
        reason: StockAdjustment,
    ) -> EngineResult<StockItem> {
        let item = validation::validate_item_name(item).map_err(LedgerError::from)?;
        let today = Local::now().date_naive();

        match reason {
            StockAdjustment::Sale => self.consume(&item, delta, today).await,
            StockAdjustment::Restock {
                threshold,
                unit_cost_cents,
            } => self.restock(&item, delta, threshold, unit_cost_cents, today).await,
        }
    }

    async fn consume(&self, item: &str, delta: i64, today: NaiveDate) -> EngineResult<StockItem> {
        let current = self
            .db
            .stock()
            .get_by_item(item)
            .await?
            .ok_or_else(|| LedgerError::UnknownItem(item.to_string()))?;

        let new_qty = current.qty + delta;
        if new_qty < 0 {
            return Err(LedgerError::InsufficientStock {
                item: current.item,
                available: current.qty,
                requested: -delta,
            }
            .into());
        }

        let mut tx = self.db.begin().await?;
        StockRepository::apply_delta_conn(&mut tx, item, delta, today).await?;
        tx.commit().await.map_err(DbError::from)?;

        let updated = StockItem {
            qty: new_qty,
            last_updated: today,
            ..current
        };
        self.alert_if_low(&updated);
        Ok(updated)
    }

    async fn restock(
        &self,
        item: &str,
        delta: i64,
        threshold: i64,
        unit_cost_cents: i64,
        today: NaiveDate,
    ) -> EngineResult<StockItem> {
        validation::validate_non_negative("threshold", threshold).map_err(LedgerError::from)?;
        validation::validate_non_negative("unit_cost", unit_cost_cents)
            .map_err(LedgerError::from)?;

        match self.db.stock().get_by_item(item).await? {
            Some(current) => {
                let updated = StockItem {
                    qty: current.qty + delta,
                    threshold,
                    unit_cost_cents,
                    last_updated: today,
                    ..current
                };
                self.db.stock().update(&updated).await?;
                info!(item = %updated.item, qty = updated.qty, "Restocked item");
                Ok(updated)
            }
            None => {
                let created = StockItem {
                    id: Uuid::new_v4().to_string(),
                    item: item.to_string(),
                    qty: delta.max(0),
                    threshold,
                    unit_cost_cents,
                    last_updated: today,
                };
                self.db.stock().insert(&created).await?;
                info!(item = %created.item, qty = created.qty, "Created stock item");
                Ok(created)
            }
        }
    }

    /// Classifies a quantity against a threshold. Pure and total.
    pub fn classify(qty: i64, threshold: i64) -> StockStatus {
        stock::classify(qty, threshold)
    }

    /// All Low/Out items, most urgent first.
    pub async fn list_low_stock(&self) -> EngineResult<Vec<StockItem>> {
        Ok(stock::low_stock_report(self.db.stock().list_all().await?))
    }

    /// Every tracked item, by name.
    pub async fn list_all(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.db.stock().list_all().await?)
    }

    fn alert_if_low(&self, item: &StockItem) {
        let status = item.status();
        if status.needs_alert() {
            warn!(
                item = %item.item,
                qty = item.qty,
                threshold = item.threshold,
                status = %status,
                "Stock level alert"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
