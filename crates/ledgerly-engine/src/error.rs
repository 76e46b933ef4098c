//! # Engine Error Types
//!
//! Error type for engine operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Engine Error Sources                          │
//! │                                                                     │
//! │  ┌───────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │  Domain (LedgerError) │   │  Storage (DbError)                │  │
//! │  │                       │   │                                   │  │
//! │  │  InvalidSale          │   │  ConnectionFailed                 │  │
//! │  │  UnknownItem          │   │  QueryFailed                      │  │
//! │  │  InsufficientStock    │   │  UniqueViolation                  │  │
//! │  │  InvalidAmount        │   │  CheckViolation                   │  │
//! │  │  NotFound/AlreadyPaid │   │  MigrationFailed                  │  │
//! │  └───────────────────────┘   └───────────────────────────────────┘  │
//! │                                                                     │
//! │  Plus configuration loading failures local to this crate.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use ledgerly_core::LedgerError;
use ledgerly_db::DbError;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error composing the domain and storage layers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The storage layer failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Failed to load the configuration file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ConfigLoadFailed(err.to_string())
    }
}

impl EngineError {
    /// Returns true if the operation failed because of caller input rather
    /// than storage trouble. Callers can surface these to the user directly.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, EngineError::Ledger(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_flagged() {
        let err = EngineError::from(LedgerError::UnknownItem("Sugar".to_string()));
        assert!(err.is_domain_error());
        assert!(err.to_string().contains("Sugar"));

        let err = EngineError::ConfigLoadFailed("missing file".to_string());
        assert!(!err.is_domain_error());
    }
}
