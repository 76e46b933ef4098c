//! # Receivables Engine
//!
//! Customer credit lifecycle: create, settle, list, remind.
//!
//! ## Status Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Stored:    pending ──── mark_paid ────► paid (terminal)            │
//! │                                                                     │
//! │  Derived:   overdue = pending AND due_date < as_of                  │
//! │             (recomputed on every read, never written back)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::error::EngineResult;
use ledgerly_core::{
    validation, EffectiveStatus, LedgerError, OutstandingReceivable, Receivable,
    ReceivableStatus, ValidationError,
};
use ledgerly_db::Database;

/// Engine for customer receivables.
#[derive(Debug, Clone)]
pub struct ReceivablesEngine {
    db: Database,
}

impl ReceivablesEngine {
    /// Creates a new ReceivablesEngine.
    pub fn new(db: Database) -> Self {
        ReceivablesEngine { db }
    }

    /// Creates a pending receivable.
    pub async fn create(
        &self,
        customer: &str,
        amount_cents: i64,
        due_date: NaiveDate,
    ) -> EngineResult<Receivable> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(LedgerError::Validation(ValidationError::Required {
                field: "customer".to_string(),
            })
            .into());
        }
        validation::validate_amount_cents(amount_cents)
            .map_err(|_| LedgerError::InvalidAmount { amount_cents })?;

        let receivable = Receivable {
            id: Uuid::new_v4().to_string(),
            customer: customer.to_string(),
            amount_cents,
            due_date,
            status: ReceivableStatus::Pending,
        };
        self.db.receivables().insert(&receivable).await?;

        info!(
            customer = %receivable.customer,
            amount_cents = receivable.amount_cents,
            due_date = %receivable.due_date,
            "Receivable created"
        );
        Ok(receivable)
    }

    /// Marks a receivable as paid. Paid is terminal: settling twice fails
    /// with `AlreadyPaid`, an unknown id with `NotFound`.
    pub async fn mark_paid(&self, id: &str) -> EngineResult<Receivable> {
        let affected = self.db.receivables().set_paid(id).await?;

        if affected == 0 {
            // Unknown id or already settled; a read tells them apart
            return match self.db.receivables().get_by_id(id).await? {
                Some(_) => Err(LedgerError::AlreadyPaid(id.to_string()).into()),
                None => Err(LedgerError::not_found("receivable", id).into()),
            };
        }

        let paid = self
            .db
            .receivables()
            .get_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("receivable", id))?;

        info!(id = %paid.id, customer = %paid.customer, "Receivable settled");
        Ok(paid)
    }

    /// Every unpaid receivable annotated with its derived overdue flag:
    /// overdue first (oldest due date first), then pending soonest-first.
    pub async fn list_outstanding(
        &self,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<OutstandingReceivable>> {
        let unpaid = self.db.receivables().list_unpaid().await?;

        // The repository already orders by due date; a stable partition
        // keeps that order within each group
        let (overdue, pending): (Vec<_>, Vec<_>) = unpaid
            .into_iter()
            .partition(|r| r.status_as_of(as_of) == EffectiveStatus::Overdue);

        Ok(overdue
            .into_iter()
            .map(|receivable| OutstandingReceivable {
                receivable,
                overdue: true,
            })
            .chain(pending.into_iter().map(|receivable| OutstandingReceivable {
                receivable,
                overdue: false,
            }))
            .collect())
    }

    /// Human-readable reminder lines for overdue receivables, formatted with
    /// the configured currency symbol and date format.
    pub async fn reminder_lines(
        &self,
        as_of: NaiveDate,
        config: &LedgerConfig,
    ) -> EngineResult<Vec<String>> {
        let outstanding = self.list_outstanding(as_of).await?;

        Ok(outstanding
            .iter()
            .filter(|o| o.overdue)
            .map(|o| {
                format!(
                    "Reminder: {} owes {} (due {})",
                    o.receivable.customer,
                    config.format_currency(o.receivable.amount()),
                    o.receivable.due_date.format(&config.date_format)
                )
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_db::DbConfig;

    async fn engine() -> ReceivablesEngine {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ReceivablesEngine::new(db)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_create_validates_inputs() {
        let eng = engine().await;

        let err = eng.create("  ", 1000, date(10)).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::Validation(_)))
        ));

        let err = eng.create("John", 0, date(10)).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::InvalidAmount { amount_cents: 0 }))
        ));
    }

    #[tokio::test]
    async fn test_mark_paid_lifecycle() {
        let eng = engine().await;
        let r = eng.create("John", 10000, date(10)).await.unwrap();

        let paid = eng.mark_paid(&r.id).await.unwrap();
        assert_eq!(paid.status, ReceivableStatus::Paid);

        let err = eng.mark_paid(&r.id).await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::AlreadyPaid(_)))
        ));

        let err = eng.mark_paid("missing-id").await;
        assert!(matches!(
            err,
            Err(crate::EngineError::Ledger(LedgerError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_due_yesterday_is_overdue_and_settles_away() {
        let eng = engine().await;
        let as_of = date(10);
        let r = eng.create("Mary", 6000, date(9)).await.unwrap();

        let outstanding = eng.list_outstanding(as_of).await.unwrap();
        assert_eq!(outstanding.len(), 1);
        assert!(outstanding[0].overdue);

        eng.mark_paid(&r.id).await.unwrap();
        assert!(eng.list_outstanding(as_of).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outstanding_orders_overdue_first() {
        let eng = engine().await;
        let as_of = date(15);
        eng.create("Soon", 1000, date(20)).await.unwrap();
        eng.create("Late", 2000, date(5)).await.unwrap();
        eng.create("Later", 3000, date(8)).await.unwrap();
        eng.create("DueToday", 4000, date(15)).await.unwrap();

        let outstanding = eng.list_outstanding(as_of).await.unwrap();
        let customers: Vec<&str> = outstanding
            .iter()
            .map(|o| o.receivable.customer.as_str())
            .collect();
        // Due today is not yet overdue
        assert_eq!(customers, vec!["Late", "Later", "DueToday", "Soon"]);
        assert!(outstanding[0].overdue && outstanding[1].overdue);
        assert!(!outstanding[2].overdue && !outstanding[3].overdue);
    }

    #[tokio::test]
    async fn test_reminder_lines_formatting() {
        let eng = engine().await;
        eng.create("Mary", 6050, date(9)).await.unwrap();
        eng.create("John", 1000, date(20)).await.unwrap();

        let lines = eng
            .reminder_lines(date(10), &LedgerConfig::default())
            .await
            .unwrap();
        assert_eq!(lines, vec!["Reminder: Mary owes Rs 60.50 (due 2024-01-09)"]);
    }
}
