//! # Order Database
//!
//! SQLite storage behind the Order actor. Orders and items live in two tables, and every
//! item row points at its order through a foreign key with `ON DELETE CASCADE`:
//!
//! ```text
//! orders (id, customer_id, address, status)
//!    ▲
//!    └── items (id, order_id, quantity, price, item_name)
//! ```
//!
//! Both tables use `AUTOINCREMENT` keys, so the database assigns every id and never hands
//! one out twice. The schema is created by the migrations under `migrations/` when
//! [`OrderDb::connect`] runs.

mod orders;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Database used when no URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db";

const MAX_CONNECTIONS: u32 = 5;

static MIGRATOR: Migrator = sqlx::migrate!();

/// Connection pool for the order tables. This is the context the Order actor runs with.
///
/// Cloning is cheap and clones share the pool.
#[derive(Debug, Clone)]
pub struct OrderDb {
    pool: SqlitePool,
}

impl OrderDb {
    /// Opens the database at `url`, creating the file if needed, and brings the schema up to
    /// date.
    ///
    /// `sqlite::memory:` gives a private database that lives as long as the pool, which is
    /// what the tests use.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database disappears with its last connection.
        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        }
        .connect_with(options)
        .await?;

        MIGRATOR.run(&pool).await?;
        info!(url, "Order database ready");
        Ok(Self { pool })
    }

    /// Waits for every connection to be returned and closes them.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
