pub mod db;
mod errors;

pub mod customers;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod restaurants;
mod write_transaction;

use std::{env, str::FromStr};

use chrono::{DateTime, Utc};
pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
pub use write_transaction::WriteTransaction;
use log::*;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const SQLITE_DB_URL: &str = "sqlite://data/food_orders.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

pub fn db_url() -> String {
    let result = env::var("FOS_DATABASE_URL").unwrap_or_else(|_| {
        info!("🗃️ FOS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("🗃️ Using database URL: {result}");
    result
}

pub fn max_connections() -> u32 {
    env::var("FOS_DB_MAX_CONNECTIONS").ok().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

/// Opens a connection pool, creating the database file if it does not exist yet. Foreign keys are enforced on every
/// connection.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteDatabaseError> {
    sqlx::migrate!("./src/db/sqlite/migrations").run(pool).await?;
    info!("🗃️ Database migrations complete");
    Ok(())
}

/// Formats a timestamp the way the store writes `created_at`, so that bound values compare correctly against the
/// stored text.
pub fn db_timestamp(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
