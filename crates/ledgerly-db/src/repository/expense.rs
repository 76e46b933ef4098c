//! # Expense Repository
//!
//! Database operations for expenses and the category breakdown behind the
//! analytics engine.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ledgerly_core::Expense;

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new expense. Expenses are immutable after creation.
    pub async fn insert(&self, expense: &Expense) -> DbResult<()> {
        debug!(
            id = %expense.id,
            category = %expense.category,
            amount_cents = expense.amount_cents,
            "Inserting expense"
        );

        sqlx::query(
            r#"
            INSERT INTO expenses (id, category, vendor, amount_cents, date, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.category)
        .bind(&expense.vendor)
        .bind(expense.amount_cents)
        .bind(expense.date)
        .bind(&expense.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets an expense by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, category, vendor, amount_cents, date, notes
            FROM expenses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Lists all expenses, newest first, ties by category name.
    pub async fn list_all(&self) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, category, vendor, amount_cents, date, notes
            FROM expenses
            ORDER BY date DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Counts all expenses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Aggregates (consumed by the analytics engine)
    // =========================================================================

    /// Per-day expense totals in `[from, to]`, days with no expenses absent.
    pub async fn daily_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT date, SUM(amount_cents)
            FROM expenses
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

    /// Summed amount per category in the window, largest first,
    /// ties broken by category name ascending.
    pub async fn breakdown(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, SUM(amount_cents) AS total
            FROM expenses
            WHERE date BETWEEN ?1 AND ?2
            GROUP BY category
            ORDER BY total DESC, category ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Summed expense amount for one day (0 if none).
    pub async fn total_on(&self, date: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses WHERE date = ?1",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
