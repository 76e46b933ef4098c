//! # Receivable Repository
//!
//! Database operations for receivables (customer credit / udhaar).
//!
//! Only `pending` and `paid` are stored; "overdue" is derived from the due
//! date at read time by the receivables engine, so a receivable never needs
//! a background job to flip its status.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ledgerly_core::Receivable;

/// Repository for receivable database operations.
#[derive(Debug, Clone)]
pub struct ReceivableRepository {
    pool: SqlitePool,
}

impl ReceivableRepository {
    /// Creates a new ReceivableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceivableRepository { pool }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new receivable.
    pub async fn insert(&self, receivable: &Receivable) -> DbResult<()> {
        debug!(
            id = %receivable.id,
            customer = %receivable.customer,
            amount_cents = receivable.amount_cents,
            "Inserting receivable"
        );

        sqlx::query(
            r#"
            INSERT INTO receivables (id, customer, amount_cents, due_date, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&receivable.id)
        .bind(&receivable.customer)
        .bind(receivable.amount_cents)
        .bind(receivable.due_date)
        .bind(receivable.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marks a pending receivable as paid. Returns the number of rows
    /// affected: 0 means the id is unknown or the receivable is already
    /// paid, and the engine tells those apart with a follow-up read.
    pub async fn set_paid(&self, id: &str) -> DbResult<u64> {
        debug!(id = %id, "Settling receivable");

        let result = sqlx::query(
            r#"
            UPDATE receivables
            SET status = 'paid'
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a receivable by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receivable>> {
        let receivable = sqlx::query_as::<_, Receivable>(
            r#"
            SELECT id, customer, amount_cents, due_date, status
            FROM receivables
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receivable)
    }

    /// Lists unpaid receivables, earliest due date first, ties by customer.
    pub async fn list_unpaid(&self) -> DbResult<Vec<Receivable>> {
        let receivables = sqlx::query_as::<_, Receivable>(
            r#"
            SELECT id, customer, amount_cents, due_date, status
            FROM receivables
            WHERE status = 'pending'
            ORDER BY due_date ASC, customer ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(receivables)
    }

    /// Lists all receivables, earliest due date first.
    pub async fn list_all(&self) -> DbResult<Vec<Receivable>> {
        let receivables = sqlx::query_as::<_, Receivable>(
            r#"
            SELECT id, customer, amount_cents, due_date, status
            FROM receivables
            ORDER BY due_date ASC, customer ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(receivables)
    }

    /// Counts all receivables.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receivables")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerly_core::ReceivableStatus;
    use uuid::Uuid;

    use crate::pool::{Database, DbConfig};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn receivable(customer: &str, amount_cents: i64, due_day: u32) -> Receivable {
        Receivable {
            id: Uuid::new_v4().to_string(),
            customer: customer.to_string(),
            amount_cents,
            due_date: date(due_day),
            status: ReceivableStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let r = receivable("John", 10000, 15);
        db.receivables().insert(&r).await.unwrap();

        let found = db.receivables().get_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(found.customer, "John");
        assert_eq!(found.status, ReceivableStatus::Pending);
        assert_eq!(found.due_date, date(15));
    }

    #[tokio::test]
    async fn test_set_paid_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let r = receivable("Mary", 6000, 10);
        db.receivables().insert(&r).await.unwrap();

        assert_eq!(db.receivables().set_paid(&r.id).await.unwrap(), 1);
        let paid = db.receivables().get_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(paid.status, ReceivableStatus::Paid);

        // Second settle affects no rows
        assert_eq!(db.receivables().set_paid(&r.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_paid_unknown_id_affects_no_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.receivables().set_paid("missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_unpaid_excludes_paid_and_orders_by_due_date() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let paid = receivable("Bob", 5000, 1);
        db.receivables().insert(&paid).await.unwrap();
        db.receivables().insert(&receivable("Mary", 6000, 20)).await.unwrap();
        db.receivables().insert(&receivable("John", 10000, 5)).await.unwrap();
        db.receivables().insert(&receivable("Alice", 2000, 5)).await.unwrap();
        db.receivables().set_paid(&paid.id).await.unwrap();

        let unpaid = db.receivables().list_unpaid().await.unwrap();
        let customers: Vec<&str> = unpaid.iter().map(|r| r.customer.as_str()).collect();
        assert_eq!(customers, vec!["Alice", "John", "Mary"]);

        assert_eq!(db.receivables().count().await.unwrap(), 4);
        assert_eq!(db.receivables().list_all().await.unwrap().len(), 4);
    }
}
