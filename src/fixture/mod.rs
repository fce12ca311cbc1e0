//! Fixture database module
//!
//! Seeds the sample SQLite file the server hands out during development:
//! an `orders` table and a `customers` table joined on the `customer`
//! column. Seeding drops and recreates both tables, so re-running the tool
//! always converges on the same dataset.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::Connection;
use thiserror::Error;

/// Errors that can abort a seeding run
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a seeding run
#[derive(Debug)]
pub struct SeedSummary {
    pub path: PathBuf,
    pub file_size: u64,
    pub orders: i64,
    pub customers: i64,
}

impl SeedSummary {
    /// File size in kilobytes, for the summary line
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.file_size as f64 / 1024.0
    }
}

/// Reference orders dataset
const ORDERS: [(i64, &str, f64, &str); 5] = [
    (1, "Alice", 29.99, "2024-01-05"),
    (2, "Bob", 49.50, "2024-01-12"),
    (3, "Charlie", 15.00, "2024-02-01"),
    (4, "Diana", 99.95, "2024-02-14"),
    (5, "Eve", 10.00, "2024-03-02"),
];

/// Reference customers dataset, one row per customer named in [`ORDERS`]
const CUSTOMERS: [(&str, &str); 5] = [
    ("Alice", "gold"),
    ("Bob", "silver"),
    ("Charlie", "bronze"),
    ("Diana", "gold"),
    ("Eve", "silver"),
];

/// Create or reset the sample database at `path`
///
/// Both tables are dropped and re-inserted inside one transaction. The
/// journal mode stays at DELETE so the artifact is a single plain file with
/// no WAL sidecars next to it.
pub async fn seed_database(path: &Path) -> Result<SeedSummary, SeedError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);

    let mut conn = SqliteConnection::connect_with(&options).await?;

    let mut tx = conn.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS orders")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS customers")
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "CREATE TABLE orders (
            order_id INTEGER PRIMARY KEY,
            customer TEXT NOT NULL,
            amount REAL NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE TABLE customers (
            customer TEXT PRIMARY KEY,
            tier TEXT NOT NULL CHECK (tier IN ('gold', 'silver', 'bronze'))
        )",
    )
    .execute(&mut *tx)
    .await?;

    for (order_id, customer, amount, created_at) in ORDERS {
        sqlx::query(
            "INSERT INTO orders (order_id, customer, amount, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(customer)
        .bind(amount)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;
    }

    for (customer, tier) in CUSTOMERS {
        sqlx::query("INSERT INTO customers (customer, tier) VALUES (?, ?)")
            .bind(customer)
            .bind(tier)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&mut conn)
        .await?;
    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(&mut conn)
        .await?;

    // Close before reading the size so everything is flushed to the file
    conn.close().await?;

    let file_size = std::fs::metadata(path)?.len();

    Ok(SeedSummary {
        path: path.to_path_buf(),
        file_size,
        orders,
        customers,
    })
}
