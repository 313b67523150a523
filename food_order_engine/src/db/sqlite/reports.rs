//! Aggregate report queries.
//!
//! Orders carry no price, so every monetary query embeds the catalog as a `CASE` expression over `food_item` with
//! the item names and prices bound as parameters.
use chrono::{DateTime, Utc};
use fos_common::Rupees;
use log::trace;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db::sqlite::{db_timestamp, SqliteDatabaseError},
    db_types::{Area, PaymentStatus, RestaurantId},
    foe_api::report_objects::{CustomerOrderCount, DailyRevenue, ItemCount, TimeWindow},
    PriceCatalog,
};

const PRICED_ORDERS: &str = r#"
    FROM orders
    JOIN restaurants ON orders.restaurant_id = restaurants.restaurant_id
    JOIN payments ON orders.transaction_id = payments.transaction_id
    WHERE payments.status = "#;

/// Pushes `COALESCE(SUM(CASE orders.food_item WHEN .. THEN .. ELSE 0 END), 0)` for the given catalog. An empty
/// catalog values everything at zero.
fn push_price_sum(builder: &mut QueryBuilder<'_, Sqlite>, prices: &PriceCatalog) {
    if prices.is_empty() {
        builder.push("COALESCE(SUM(0), 0)");
        return;
    }
    builder.push("COALESCE(SUM(CASE orders.food_item");
    for (item, price) in prices.iter() {
        builder.push(" WHEN ");
        builder.push_bind(item);
        builder.push(" THEN ");
        builder.push_bind(price);
    }
    builder.push(" ELSE 0 END), 0)");
}

pub async fn earnings_for_area(
    area: Area,
    prices: &PriceCatalog,
    window: Option<TimeWindow>,
    conn: &mut SqliteConnection,
) -> Result<Rupees, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("SELECT ");
    push_price_sum(&mut builder, prices);
    builder.push(PRICED_ORDERS);
    builder.push_bind(PaymentStatus::Success);
    builder.push(" AND restaurants.area = ");
    builder.push_bind(area);
    if let Some(window) = window {
        builder.push(" AND orders.created_at >= ");
        builder.push_bind(db_timestamp(&window.since));
        builder.push(" AND orders.created_at < ");
        builder.push_bind(db_timestamp(&window.until));
    }
    trace!("🗃️ Executing query: {}", builder.sql());
    let total = builder.build_query_scalar::<Rupees>().fetch_one(conn).await?;
    Ok(total)
}

pub async fn customer_order_counts(
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<CustomerOrderCount>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, CustomerOrderCount>(
        r#"
            SELECT customers.name AS name, COUNT(orders.order_id) AS orders_count
            FROM customers
            JOIN orders ON orders.customer_id = customers.id
            GROUP BY customers.name
            ORDER BY orders_count DESC, customers.name ASC
            LIMIT $1
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn daily_revenue(
    prices: &PriceCatalog,
    since: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Vec<DailyRevenue>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("SELECT date(orders.created_at) AS date, restaurants.area AS area, ");
    push_price_sum(&mut builder, prices);
    builder.push(" AS revenue");
    builder.push(PRICED_ORDERS);
    builder.push_bind(PaymentStatus::Success);
    builder.push(" AND orders.created_at >= ");
    builder.push_bind(db_timestamp(&since));
    builder.push(" GROUP BY date(orders.created_at), restaurants.area ORDER BY date DESC, area ASC");
    trace!("🗃️ Executing query: {}", builder.sql());
    let rows = builder.build_query_as::<DailyRevenue>().fetch_all(conn).await?;
    Ok(rows)
}

pub async fn item_counts_for_restaurant(
    restaurant_id: &RestaurantId,
    conn: &mut SqliteConnection,
) -> Result<Vec<ItemCount>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, ItemCount>(
        r#"
            SELECT orders.food_item AS food_item, COUNT(*) AS count
            FROM orders
            JOIN payments ON orders.transaction_id = payments.transaction_id
            WHERE orders.restaurant_id = $1 AND payments.status = $2
            GROUP BY orders.food_item
            ORDER BY orders.food_item ASC
        "#,
    )
    .bind(restaurant_id)
    .bind(PaymentStatus::Success)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}
