use chrono::{DateTime, Utc};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::{
    db::sqlite::orders,
    db_timestamp,
    db_types::{NewOrder, Order, OrderId},
    SqliteDatabase,
};

pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
    db
}

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/fos_test_store_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(url).await {
            warn!("Error dropping database {url}: {e:?}");
        }
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("🚀️ Created Sqlite database {url}");
}

/// Rewrites an order's timestamp, so that tests can place orders in the past.
pub async fn backdate_order(db: &SqliteDatabase, order_id: &OrderId, created_at: DateTime<Utc>) {
    sqlx::query("UPDATE orders SET created_at = $1 WHERE order_id = $2")
        .bind(db_timestamp(&created_at))
        .bind(order_id)
        .execute(db.pool())
        .await
        .expect("Error backdating order");
}

/// Stores an order without checking its payment or restaurant, for setting up rows that order placement refuses.
pub async fn insert_unchecked_order(db: &SqliteDatabase, order: NewOrder) -> Order {
    let mut conn = db.pool().acquire().await.expect("Error acquiring a connection");
    orders::insert_order(order, &mut conn).await.expect("Error inserting order")
}
