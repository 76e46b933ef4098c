//! # ledgerly-engine: Business Engines for Ledgerly
//!
//! The orchestration layer sitting between the pure rules in `ledgerly-core`
//! and the SQLite repositories in `ledgerly-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Ledgerly Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                ledgerly-engine (THIS CRATE)                   │  │
//! │  │                                                               │  │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌───────────────────────┐  │  │
//! │  │  │ StockEngine  │ │ BillingEngine│ │  ReceivablesEngine    │  │  │
//! │  │  │ adjust       │ │ record_sale  │ │  create / mark_paid   │  │  │
//! │  │  │ list_low     │ │ record_      │ │  list_outstanding     │  │  │
//! │  │  │              │ │   expense    │ │  reminder_lines       │  │  │
//! │  │  └──────────────┘ └──────────────┘ └───────────────────────┘  │  │
//! │  │  ┌──────────────────────────────┐ ┌───────────────────────┐  │  │
//! │  │  │       AnalyticsEngine        │ │       Importer        │  │  │
//! │  │  │ daily_totals / top_items     │ │  typed rows only,     │  │  │
//! │  │  │ breakdown / forecast         │ │  per-row failures     │  │  │
//! │  │  └──────────────────────────────┘ └───────────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │         │ pure rules                        │ SQL                   │
//! │         ▼                                   ▼                       │
//! │   ledgerly-core                        ledgerly-db                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledgerly_db::{Database, DbConfig};
//! use ledgerly_engine::BillingEngine;
//!
//! let db = Database::new(DbConfig::new("ledgerly.db")).await?;
//! let billing = BillingEngine::new(db.clone());
//! let outcome = billing.record_sale("Sugar", 2, 5000, "John", None).await?;
//! println!("Receipt #{}", outcome.sale.receipt_number);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod billing;
pub mod config;
pub mod error;
pub mod import;
pub mod receivables;
pub mod stock;

// =============================================================================
// Re-exports
// =============================================================================

pub use analytics::{AnalyticsEngine, DailySummary, RecordKind};
pub use billing::{BillingEngine, SaleOutcome};
pub use config::LedgerConfig;
pub use error::{EngineError, EngineResult};
pub use import::{ExpenseRow, ImportReport, Importer, InventoryRow, SaleRow};
pub use receivables::ReceivablesEngine;
pub use stock::{StockAdjustment, StockEngine};
