//! # ledgerly-core: Pure Business Logic for Ledgerly
//!
//! This crate is the heart of the ledger: every rule that turns raw
//! transaction records into derived state lives here, as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Ledgerly Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                   UI / CLI (external)                         │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                    ledgerly-engine                            │ │
//! │  │   BillingEngine ─ StockEngine ─ ReceivablesEngine ─ Analytics │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ ledgerly-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐  │ │
//! │  │   │  types   │ │  money   │ │  stock   │ │   analytics    │  │ │
//! │  │   │ Sale     │ │  Money   │ │ classify │ │ densify_daily  │  │ │
//! │  │   │ StockItem│ │ (cents)  │ │ low list │ │ linear_forecast│  │ │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────────┘  │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS            │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                ledgerly-db (SQLite repositories)              │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, StockItem, Expense, Receivable)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stock`] - Stock classification and low-stock ordering
//! - [`analytics`] - Daily total densification and the sales forecaster
//! - [`validation`] - Input validation for the engines
//! - [`error`] - Domain error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - including "today", which
//!    is always an argument, never read from the clock
//! 2. **Integer Money**: all monetary values are cents (i64)
//! 3. **Derived state is a view**: stock status and overdue are computed from
//!    (entity, context), never stored where they could go stale

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer name recorded when a sale has no named customer.
///
/// An empty customer field is an anonymous walk-in sale rather than an
/// error; normalization happens once, at sale creation.
pub const WALK_IN_CUSTOMER: &str = "Walk-in";

/// Default trailing window (days) fed to the sales forecaster.
///
/// Tunable via configuration; this is the fallback when none is supplied.
pub const DEFAULT_FORECAST_LOOKBACK_DAYS: u32 = 14;
