//! # Validation Module
//!
//! Input validation for the engines. These run before any business logic or
//! database access: a request that fails here never touches the store.
//!
//! ## Usage
//! ```rust
//! use ledgerly_core::validation::{validate_quantity, validate_unit_price_cents};
//!
//! validate_quantity(3).unwrap();
//! validate_unit_price_cents(0).unwrap(); // free items are fine
//! ```

use crate::error::ValidationError;
use crate::WALK_IN_CUSTOMER;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name (the stock business key).
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_item_name(item: &str) -> ValidationResult<String> {
    let item = item.trim();

    if item.is_empty() {
        return Err(ValidationError::Required {
            field: "item".to_string(),
        });
    }

    Ok(item.to_string())
}

/// Normalizes a customer name: empty input means an anonymous walk-in sale.
pub fn normalize_customer(customer: &str) -> String {
    let customer = customer.trim();
    if customer.is_empty() {
        WALK_IN_CUSTOMER.to_string()
    } else {
        customer.to_string()
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity: must be strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price in cents: zero is allowed (free items), negative
/// is not.
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }
    Ok(())
}

/// Validates an expense or receivable amount in cents: must be strictly
/// positive.
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock threshold or restock quantity: must not be negative.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("  Sugar ").unwrap(), "Sugar");
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
    }

    #[test]
    fn test_normalize_customer() {
        assert_eq!(normalize_customer("John"), "John");
        assert_eq!(normalize_customer(""), WALK_IN_CUSTOMER);
        assert_eq!(normalize_customer("   "), WALK_IN_CUSTOMER);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_unit_price_cents() {
        assert!(validate_unit_price_cents(0).is_ok());
        assert!(validate_unit_price_cents(1099).is_ok());
        assert!(validate_unit_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents(1).is_ok());
        assert!(validate_amount_cents(0).is_err());
        assert!(validate_amount_cents(-500).is_err());
    }
}
