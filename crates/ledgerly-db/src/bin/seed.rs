//! # Seed Data Generator
//!
//! Populates the database with a small sample ledger for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p ledgerly-db --bin seed
//!
//! # Specify database path
//! cargo run -p ledgerly-db --bin seed -- --db ./data/ledgerly.db
//! ```
//!
//! ## Generated Data
//! - Three stock items (Sugar, Rice, Tea), one of them already below threshold
//! - Three sales recorded the real way: counter bump, stock decrement and
//!   insert in one transaction each
//! - A handful of expenses across categories
//! - Two receivables, one past due

use chrono::{Duration, Local, NaiveDate};
use std::env;
use uuid::Uuid;

use ledgerly_core::{Expense, Receivable, ReceivableStatus, Sale, StockItem};
use ledgerly_db::{Database, DbConfig, SaleRepository, StockRepository};

/// Sample stock: (item, qty, threshold, unit_cost_cents).
const STOCK: &[(&str, i64, i64, i64)] = &[
    ("Sugar", 100, 10, 4000),
    ("Rice", 50, 5, 5500),
    ("Tea", 200, 20, 800),
];

/// Sample sales: (item, qty, unit_price_cents, customer).
const SALES: &[(&str, i64, i64, &str)] = &[
    ("Sugar", 2, 5000, "John"),
    ("Rice", 1, 6000, "Mary"),
    ("Tea", 5, 1000, "Bob"),
];

/// Sample expenses: (category, vendor, amount_cents).
const EXPENSES: &[(&str, &str, i64)] = &[
    ("fuel", "City Fuel Station", 3500),
    ("rent", "Main Street Properties", 50000),
    ("misc", "ACME Supplies", 1250),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./ledgerly_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ledgerly Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ledgerly_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ledgerly Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.stock().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} stock items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let today = Local::now().date_naive();

    println!();
    println!("Seeding stock...");
    for &(item, qty, threshold, unit_cost_cents) in STOCK {
        db.stock()
            .insert(&StockItem {
                id: Uuid::new_v4().to_string(),
                item: item.to_string(),
                qty,
                threshold,
                unit_cost_cents,
                last_updated: today,
            })
            .await?;
        println!("  + {} ({} units)", item, qty);
    }

    println!();
    println!("Recording sales...");
    for &(item, qty, unit_price_cents, customer) in SALES {
        let sale = record_sale(&db, item, qty, unit_price_cents, customer, today).await?;
        println!(
            "  + Receipt #{}: {} x{} for {}",
            sale.receipt_number, sale.item, sale.qty, sale.customer
        );
    }

    println!();
    println!("Recording expenses...");
    for &(category, vendor, amount_cents) in EXPENSES {
        db.expenses()
            .insert(&Expense {
                id: Uuid::new_v4().to_string(),
                category: category.to_string(),
                vendor: vendor.to_string(),
                amount_cents,
                date: today,
                notes: None,
            })
            .await?;
        println!("  + {} / {}", category, vendor);
    }

    println!();
    println!("Recording receivables...");
    let receivables = [
        ("John", 10000, today + Duration::days(7)),
        ("Mary", 6000, today - Duration::days(3)),
    ];
    for (customer, amount_cents, due_date) in receivables {
        db.receivables()
            .insert(&Receivable {
                id: Uuid::new_v4().to_string(),
                customer: customer.to_string(),
                amount_cents,
                due_date,
                status: ReceivableStatus::Pending,
            })
            .await?;
        println!("  + {} owes {} (due {})", customer, amount_cents, due_date);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Records one sale the way the billing engine does: receipt counter, stock
/// decrement and sale insert in a single transaction.
async fn record_sale(
    db: &Database,
    item: &str,
    qty: i64,
    unit_price_cents: i64,
    customer: &str,
    date: NaiveDate,
) -> Result<Sale, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    StockRepository::apply_delta_conn(&mut tx, item, -qty, date).await?;
    let receipt_number = SaleRepository::next_receipt_number_conn(&mut tx).await?;

    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        receipt_number,
        item: item.to_string(),
        qty,
        unit_price_cents,
        total_cents: unit_price_cents * qty,
        customer: customer.to_string(),
        date,
    };
    SaleRepository::insert_conn(&mut tx, &sale).await?;

    tx.commit().await?;
    Ok(sale)
}
