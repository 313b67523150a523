use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Area, NewRestaurant, Restaurant, RestaurantId},
};

pub async fn insert_restaurant(
    restaurant: NewRestaurant,
    conn: &mut SqliteConnection,
) -> Result<Restaurant, SqliteDatabaseError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        r#"
            INSERT INTO restaurants (restaurant_id, restaurant_name, area) VALUES ($1, $2, $3)
            RETURNING restaurant_id, restaurant_name, area
        "#,
    )
    .bind(RestaurantId::random())
    .bind(restaurant.restaurant_name)
    .bind(restaurant.area)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Restaurant {} ({}) saved in {}", restaurant.restaurant_id, restaurant.restaurant_name, restaurant.area);
    Ok(restaurant)
}

pub async fn fetch_restaurant(
    id: &RestaurantId,
    conn: &mut SqliteConnection,
) -> Result<Option<Restaurant>, SqliteDatabaseError> {
    let restaurant = sqlx::query_as::<_, Restaurant>(
        "SELECT restaurant_id, restaurant_name, area FROM restaurants WHERE restaurant_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(restaurant)
}

pub async fn restaurants_in_area(
    area: Area,
    conn: &mut SqliteConnection,
) -> Result<Vec<Restaurant>, SqliteDatabaseError> {
    let restaurants = sqlx::query_as::<_, Restaurant>(
        "SELECT restaurant_id, restaurant_name, area FROM restaurants WHERE area = $1 ORDER BY restaurant_name ASC",
    )
    .bind(area)
    .fetch_all(conn)
    .await?;
    Ok(restaurants)
}
