//! # Repository Module
//!
//! Database repository implementations for Ledgerly.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Engine call                                                        │
//! │       │   db.stock().get_by_item("Sugar")                           │
//! │       ▼                                                             │
//! │  StockRepository                                                    │
//! │  ├── get_by_item(&self, item)                                       │
//! │  ├── insert(&self, item)                                            │
//! │  └── list_all(&self)                                                │
//! │       │   SQL                                                       │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository also exposes `_conn` associated functions that take a
//! `&mut SqliteConnection`, so the billing engine can run several operations
//! inside one transaction obtained from [`crate::Database::begin`].
//!
//! ## Available Repositories
//!
//! - [`sale::SaleRepository`] - Sales, aggregates, and the receipt counter
//! - [`stock::StockRepository`] - Stock items
//! - [`expense::ExpenseRepository`] - Expenses and category breakdowns
//! - [`receivable::ReceivableRepository`] - Receivables

pub mod expense;
pub mod receivable;
pub mod sale;
pub mod stock;
