use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::{db_timestamp, SqliteDatabaseError},
    db_types::{NewOrder, Order, OrderId},
    foe_api::order_objects::OrderQueryFilter,
};

/// Inserts a new order into the database using the given connection. This is not atomic. You can embed this call
/// inside a transaction if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
///
/// The references are not checked here; the foreign keys and the unique payment index will reject a bad row.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, SqliteDatabaseError> {
    let order = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (order_id, food_item, transaction_id, restaurant_id, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING order_id, food_item, transaction_id, restaurant_id, customer_id, created_at
        "#,
    )
    .bind(OrderId::random())
    .bind(order.food_item)
    .bind(order.transaction_id)
    .bind(order.restaurant_id)
    .bind(order.customer_id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Order {} for {} has been saved in the DB", order.order_id, order.food_item);
    Ok(order)
}

pub async fn fetch_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let order = sqlx::query_as::<_, Order>(
        r#"
            SELECT order_id, food_item, transaction_id, restaurant_id, customer_id, created_at
            FROM orders
            WHERE order_id = $1
        "#,
    )
    .bind(order_id)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Fetches orders according to criteria specified in the `OrderQueryFilter`
///
/// Resulting orders are ordered by `created_at` in ascending order
pub async fn fetch_orders(
    query: OrderQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new(
        "SELECT order_id, food_item, transaction_id, restaurant_id, customer_id, created_at FROM orders ",
    );
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(customer_id) = query.customer_id {
        where_clause.push("customer_id = ");
        where_clause.push_bind_unseparated(customer_id);
    }
    if let Some(restaurant_id) = query.restaurant_id {
        where_clause.push("restaurant_id = ");
        where_clause.push_bind_unseparated(restaurant_id);
    }
    if let Some(transaction_id) = query.transaction_id {
        where_clause.push("transaction_id = ");
        where_clause.push_bind_unseparated(transaction_id);
    }
    if let Some(food_item) = query.food_item {
        where_clause.push("food_item = ");
        where_clause.push_bind_unseparated(food_item);
    }
    if let Some(since) = query.since {
        where_clause.push("created_at >= ");
        where_clause.push_bind_unseparated(db_timestamp(&since));
    }
    if let Some(until) = query.until {
        where_clause.push("created_at < ");
        where_clause.push_bind_unseparated(db_timestamp(&until));
    }
    builder.push(" ORDER BY created_at ASC, order_id ASC");

    trace!("🗃️ Executing query: {}", builder.sql());
    let orders = builder.build_query_as::<Order>().fetch_all(conn).await?;
    trace!("🗃️ Result of fetch_orders: {}", orders.len());
    Ok(orders)
}
