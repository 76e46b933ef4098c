//! # Sale Repository
//!
//! Database operations for sales, the sales aggregates behind the analytics
//! engine, and the receipt number counter.
//!
//! ## Receipt Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  The receipt sequence lives in the `counters` table and is bumped   │
//! │  with UPDATE ... RETURNING *inside the sale transaction*:           │
//! │                                                                     │
//! │    BEGIN                                                            │
//! │      UPDATE counters SET value = value + 1 ... RETURNING value      │
//! │      UPDATE stock SET qty = qty - ?                                 │
//! │      INSERT INTO sales (..., receipt_number, ...)                   │
//! │    COMMIT                                                           │
//! │                                                                     │
//! │  A rolled-back sale rolls the counter back too, so the committed    │
//! │  sequence is strictly increasing with no reuse, and it survives     │
//! │  restarts because it is just a row.                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use ledgerly_core::Sale;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Transactional writes
    // =========================================================================

    /// Allocates the next receipt number inside a transaction.
    ///
    /// Strictly increasing, never reused: the counter row is only ever
    /// incremented, and a rollback undoes the increment along with the sale.
    pub async fn next_receipt_number_conn(conn: &mut SqliteConnection) -> DbResult<i64> {
        let value: i64 = sqlx::query_scalar(
            r#"
            UPDATE counters
            SET value = value + 1
            WHERE name = 'receipt_number'
            RETURNING value
            "#,
        )
        .fetch_one(&mut *conn)
        .await?;

        Ok(value)
    }

    /// Inserts a sale inside a transaction.
    ///
    /// Sales are immutable after creation: there is deliberately no update
    /// or delete counterpart.
    pub async fn insert_conn(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, receipt_number = sale.receipt_number, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, receipt_number, item, qty,
                unit_price_cents, total_cents, customer, date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.receipt_number)
        .bind(&sale.item)
        .bind(sale.qty)
        .bind(sale.unit_price_cents)
        .bind(sale.total_cents)
        .bind(&sale.customer)
        .bind(sale.date)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, receipt_number, item, qty,
                   unit_price_cents, total_cents, customer, date
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales in receipt order.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, receipt_number, item, qty,
                   unit_price_cents, total_cents, customer, date
            FROM sales
            ORDER BY receipt_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Aggregates (consumed by the analytics engine)
    // =========================================================================

    /// Per-day sale totals in `[from, to]`, days with no sales absent.
    /// The analytics engine densifies the gaps to zero.
    pub async fn daily_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT date, SUM(total_cents)
            FROM sales
            WHERE date BETWEEN ?1 AND ?2
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top-n items by summed sale amount in the window, descending,
    /// ties broken by item name ascending.
    pub async fn top_items(
        &self,
        n: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT item, SUM(total_cents) AS total
            FROM sales
            WHERE date BETWEEN ?1 AND ?2
            GROUP BY item
            ORDER BY total DESC, item ASC
            LIMIT ?3
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Summed sale total for one day (0 if none).
    pub async fn total_on(&self, date: NaiveDate) -> DbResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM sales WHERE date = ?1")
                .bind(date)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
