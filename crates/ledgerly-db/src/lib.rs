//! # ledgerly-db: Database Layer for Ledgerly
//!
//! SQLite storage for the ledger, accessed through repositories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Ledgerly Data Flow                            │
//! │                                                                     │
//! │  Engine call (record_sale, list_low_stock, ...)                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  ledgerly-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐  │  │
//! │  │  │   Database   │  │  Repositories  │  │    Migrations    │  │  │
//! │  │  │  (pool.rs)   │◄─│ sale / stock / │  │    (embedded)    │  │  │
//! │  │  │  SqlitePool  │  │ expense /      │  │ 001_initial_...  │  │  │
//! │  │  │  WAL mode    │  │ receivable     │  │                  │  │  │
//! │  │  └──────────────┘  └────────────────┘  └──────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (or :memory: in tests)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledgerly_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/ledgerly.db")).await?;
//! let items = db.stock().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::expense::ExpenseRepository;
pub use repository::receivable::ReceivableRepository;
pub use repository::sale::SaleRepository;
pub use repository::stock::StockRepository;

/// A database transaction handle.
///
/// Handed out by [`Database::begin`]; pass `&mut *tx` to the `_conn`
/// repository functions to run them inside the transaction, then commit.
pub type Tx = sqlx::Transaction<'static, sqlx::Sqlite>;
