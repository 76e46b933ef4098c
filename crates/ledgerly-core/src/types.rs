//! # Domain Types
//!
//! Core domain types used throughout Ledgerly.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐         │
//! │  │     Sale       │  │   StockItem    │  │    Expense     │         │
//! │  │  ────────────  │  │  ────────────  │  │  ────────────  │         │
//! │  │  id (UUID)     │  │  id (UUID)     │  │  id (UUID)     │         │
//! │  │  receipt_number│  │  item (unique) │  │  category      │         │
//! │  │  item, qty     │  │  qty, threshold│  │  vendor        │         │
//! │  │  total_cents   │  │  unit_cost     │  │  amount_cents  │         │
//! │  └────────────────┘  └────────────────┘  └────────────────┘         │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐         │
//! │  │   Receivable   │  │  StockStatus   │  │ReceivableStatus│         │
//! │  │  ────────────  │  │  ────────────  │  │  ────────────  │         │
//! │  │  customer      │  │  Ok            │  │  Pending       │         │
//! │  │  amount_cents  │  │  Low           │  │  Paid          │         │
//! │  │  due_date      │  │  Out           │  │  (stored)      │         │
//! │  └────────────────┘  └────────────────┘  └────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has a UUID v4 `id` for database relations. Two entities also
//! carry a business key: `StockItem.item` (case-insensitive unique) and
//! `Sale.receipt_number` (sequential, never reused).
//!
//! ## Derived Status Is a View
//! `StockItem` does not store its Ok/Low/Out status and `Receivable` does not
//! store "overdue". Both are recomputed on read from the entity plus a context
//! value (current quantity, the as-of date), so they can never go stale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::stock;

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable after creation: corrections are new sales,
/// not edits, so there is no update path and no voiding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sequential receipt number, unique per installation.
    pub receipt_number: i64,

    /// Item sold (matches a StockItem's business key).
    pub item: String,

    /// Quantity sold (always positive).
    pub qty: i64,

    /// Unit price in cents at time of sale.
    pub unit_price_cents: i64,

    /// Line total in cents: qty × unit_price.
    pub total_cents: i64,

    /// Customer name; anonymous sales are normalized to "Walk-in".
    pub customer: String,

    /// Calendar date of the sale.
    pub date: NaiveDate,
}

impl Sale {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Classification of a stock item against its low-stock threshold.
///
/// Total over every (qty, threshold) pair: exactly one variant applies,
/// and `Out` holds iff qty == 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// qty > threshold.
    Ok,
    /// 0 < qty <= threshold.
    Low,
    /// qty == 0.
    Out,
}

impl StockStatus {
    /// Whether this status should raise a low-stock alert.
    #[inline]
    pub fn needs_alert(&self) -> bool {
        matches!(self, StockStatus::Low | StockStatus::Out)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StockStatus::Ok => "OK",
            StockStatus::Low => "LOW",
            StockStatus::Out => "OUT",
        };
        f.write_str(s)
    }
}

/// A tracked inventory item.
///
/// Invariant: `qty` never goes negative. A sale that would drive it below
/// zero is rejected (`InsufficientStock`), not clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business key, unique case-insensitively.
    pub item: String,

    /// Current quantity on hand (>= 0).
    pub qty: i64,

    /// Low-stock boundary (>= 0).
    pub threshold: i64,

    /// Unit cost in cents.
    pub unit_cost_cents: i64,

    /// Set on every mutation.
    pub last_updated: NaiveDate,
}

impl StockItem {
    /// Returns the unit cost as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }

    /// Classifies this item against its threshold. Pure; no side effects.
    #[inline]
    pub fn status(&self) -> StockStatus {
        stock::classify(self.qty, self.threshold)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Fixed expense categories, with free text as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Fuel,
    Rent,
    Salaries,
    Utilities,
    Misc,
    /// Anything outside the fixed set; kept verbatim.
    Other(String),
}

impl ExpenseCategory {
    /// Parses a category label; unrecognized labels fall back to `Other`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "fuel" => ExpenseCategory::Fuel,
            "rent" => ExpenseCategory::Rent,
            "salaries" => ExpenseCategory::Salaries,
            "utilities" => ExpenseCategory::Utilities,
            "misc" => ExpenseCategory::Misc,
            _ => ExpenseCategory::Other(label.trim().to_string()),
        }
    }

    /// The label stored in the database and shown in breakdowns.
    pub fn label(&self) -> &str {
        match self {
            ExpenseCategory::Fuel => "Fuel",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Salaries => "Salaries",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Misc => "Misc",
            ExpenseCategory::Other(label) => label,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded business expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Category label (see [`ExpenseCategory`]).
    pub category: String,

    /// Who was paid.
    pub vendor: String,

    /// Amount in cents (always positive).
    pub amount_cents: i64,

    /// Calendar date of the expense.
    pub date: NaiveDate,

    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl Expense {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the typed category (free text falls back to `Other`).
    #[inline]
    pub fn category(&self) -> ExpenseCategory {
        ExpenseCategory::parse(&self.category)
    }
}

// =============================================================================
// Receivable
// =============================================================================

/// Stored receivable status.
///
/// Only `Pending` and `Paid` are ever persisted. "Overdue" is a derived
/// predicate over (due_date, as-of date), see [`Receivable::is_overdue`],
/// so the stored status can never be stale truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReceivableStatus {
    /// Amount is owed. May transition to Paid.
    Pending,
    /// Settled. Terminal; no further transitions.
    Paid,
}

impl Default for ReceivableStatus {
    fn default() -> Self {
        ReceivableStatus::Pending
    }
}

/// Receivable status as seen by callers, with the overdue view applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Pending,
    Paid,
    /// Pending and past due as of the evaluation date. Reversible: it is a
    /// view over `as_of`, not a stored transition.
    Overdue,
}

/// An amount owed by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receivable {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer who owes the amount.
    pub customer: String,

    /// Amount owed in cents (always positive).
    pub amount_cents: i64,

    /// When payment is due.
    pub due_date: NaiveDate,

    /// Stored status: pending or paid.
    pub status: ReceivableStatus,
}

impl Receivable {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Derived overdue predicate: past due and not already paid.
    #[inline]
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.status != ReceivableStatus::Paid && self.due_date < as_of
    }

    /// Status with the overdue view applied against `as_of`.
    pub fn status_as_of(&self, as_of: NaiveDate) -> EffectiveStatus {
        match self.status {
            ReceivableStatus::Paid => EffectiveStatus::Paid,
            ReceivableStatus::Pending if self.is_overdue(as_of) => EffectiveStatus::Overdue,
            ReceivableStatus::Pending => EffectiveStatus::Pending,
        }
    }
}

/// A non-paid receivable annotated with the derived overdue flag,
/// as returned by `list_outstanding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutstandingReceivable {
    pub receivable: Receivable,
    pub overdue: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expense_category_parse_roundtrip() {
        assert_eq!(ExpenseCategory::parse("fuel"), ExpenseCategory::Fuel);
        assert_eq!(ExpenseCategory::parse("Rent"), ExpenseCategory::Rent);
        assert_eq!(
            ExpenseCategory::parse("Stationery"),
            ExpenseCategory::Other("Stationery".to_string())
        );
        assert_eq!(ExpenseCategory::parse("UTILITIES").label(), "Utilities");
    }

    #[test]
    fn test_receivable_overdue_is_a_view() {
        let r = Receivable {
            id: "r-1".to_string(),
            customer: "Mary".to_string(),
            amount_cents: 5000,
            due_date: date(2024, 3, 10),
            status: ReceivableStatus::Pending,
        };

        assert!(!r.is_overdue(date(2024, 3, 10)));
        assert!(r.is_overdue(date(2024, 3, 11)));
        assert_eq!(r.status_as_of(date(2024, 3, 11)), EffectiveStatus::Overdue);
        // The view is reversible: an earlier as_of sees it pending again
        assert_eq!(r.status_as_of(date(2024, 3, 1)), EffectiveStatus::Pending);

        let paid = Receivable {
            status: ReceivableStatus::Paid,
            ..r
        };
        assert!(!paid.is_overdue(date(2024, 3, 11)));
        assert_eq!(paid.status_as_of(date(2024, 3, 11)), EffectiveStatus::Paid);
    }

    #[test]
    fn test_stock_item_status_delegates_to_classify() {
        let item = StockItem {
            id: "s-1".to_string(),
            item: "Sugar".to_string(),
            qty: 7,
            threshold: 5,
            unit_cost_cents: 4000,
            last_updated: date(2024, 1, 1),
        };
        assert_eq!(item.status(), StockStatus::Ok);
    }

    #[test]
    fn test_sale_money_accessors() {
        let sale = Sale {
            id: "sale-1".to_string(),
            receipt_number: 7,
            item: "Tea".to_string(),
            qty: 5,
            unit_price_cents: 1000,
            total_cents: 5000,
            customer: "Bob".to_string(),
            date: date(2024, 1, 16),
        };
        assert_eq!(sale.unit_price().cents(), 1000);
        assert_eq!(sale.total().cents(), 5000);
    }
}
