//! # Error Types
//!
//! Domain error taxonomy for ledgerly-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  ledgerly-core errors (this file)                                   │
//! │  ├── LedgerError      - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  ledgerly-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  ledgerly-engine errors                                             │
//! │  └── EngineError      - LedgerError | DbError, surfaced to the UI   │
//! │                                                                     │
//! │  Flow: ValidationError → LedgerError → EngineError → UI message     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All variants are recoverable: they describe one rejected request, never a
//! process-fatal condition. Engines propagate them unchanged with `?`.

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Business rule violations.
///
/// Each variant maps directly to a user-facing message; the UI layer is
/// responsible for display, the engines only construct and propagate.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A sale request failed basic validation (qty, unit price).
    #[error("Invalid sale: {reason}")]
    InvalidSale { reason: String },

    /// A sale referenced an item that is not registered in stock.
    ///
    /// ## Business Rule
    /// Sales against untracked items are rejected on purpose: inventory must
    /// be registered before it can be sold.
    #[error("Unknown item: {0} (register it in stock before selling)")]
    UnknownItem(String),

    /// A sale would drive the item's quantity below zero.
    ///
    /// The quantity is never clamped; the whole sale is rejected and the
    /// stock level stays where it was.
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// A receivable or expense amount was zero or negative.
    #[error("Invalid amount: {amount_cents} cents (must be positive)")]
    InvalidAmount { amount_cents: i64 },

    /// Entity lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `mark_paid` on a receivable that is already paid. Paid is terminal.
    #[error("Receivable {0} is already paid")]
    AlreadyPaid(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl LedgerError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before business logic runs, when a field value does not meet
/// requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            item: "Sugar".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Sugar: available 2, requested 3"
        );

        let err = LedgerError::not_found("Receivable", "r-42");
        assert_eq!(err.to_string(), "Receivable not found: r-42");
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "qty".to_string(),
        };
        let err: LedgerError = validation_err.into();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
