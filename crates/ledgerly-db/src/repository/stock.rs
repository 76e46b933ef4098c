//! # Stock Repository
//!
//! Database operations for stock items.
//!
//! The `item` column is UNIQUE COLLATE NOCASE, so "sugar" and "Sugar" are the
//! same row; every lookup below inherits that collation from the column.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use ledgerly_core::StockItem;

/// Repository for stock database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a stock item by its case-insensitive business key.
    pub async fn get_by_item(&self, item: &str) -> DbResult<Option<StockItem>> {
        let row = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT id, item, qty, threshold, unit_cost_cents, last_updated
            FROM stock
            WHERE item = ?1
            "#,
        )
        .bind(item)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Same as [`get_by_item`](Self::get_by_item), inside a transaction.
    pub async fn get_by_item_conn(
        conn: &mut SqliteConnection,
        item: &str,
    ) -> DbResult<Option<StockItem>> {
        let row = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT id, item, qty, threshold, unit_cost_cents, last_updated
            FROM stock
            WHERE item = ?1
            "#,
        )
        .bind(item)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Lists every stock item, ordered by item name.
    pub async fn list_all(&self) -> DbResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT id, item, qty, threshold, unit_cost_cents, last_updated
            FROM stock
            ORDER BY item
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts all stock items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new stock item.
    pub async fn insert(&self, item: &StockItem) -> DbResult<()> {
        debug!(item = %item.item, qty = item.qty, "Inserting stock item");

        sqlx::query(
            r#"
            INSERT INTO stock (id, item, qty, threshold, unit_cost_cents, last_updated)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.item)
        .bind(item.qty)
        .bind(item.threshold)
        .bind(item.unit_cost_cents)
        .bind(item.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing item's quantity, threshold and unit cost by its
    /// business key. Returns the number of rows affected (0 = unknown item).
    pub async fn update(&self, item: &StockItem) -> DbResult<u64> {
        debug!(item = %item.item, qty = item.qty, "Updating stock item");

        let result = sqlx::query(
            r#"
            UPDATE stock
            SET qty = ?2, threshold = ?3, unit_cost_cents = ?4, last_updated = ?5
            WHERE item = ?1
            "#,
        )
        .bind(&item.item)
        .bind(item.qty)
        .bind(item.threshold)
        .bind(item.unit_cost_cents)
        .bind(item.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Applies a quantity delta inside a transaction and stamps
    /// `last_updated`. Returns the number of rows affected (0 = unknown item).
    ///
    /// The caller has already checked availability on the same transaction,
    /// and the schema's `qty >= 0` CHECK backs that up.
    pub async fn apply_delta_conn(
        conn: &mut SqliteConnection,
        item: &str,
        delta: i64,
        last_updated: NaiveDate,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE stock
            SET qty = qty + ?2, last_updated = ?3
            WHERE item = ?1
            "#,
        )
        .bind(item)
        .bind(delta)
        .bind(last_updated)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
