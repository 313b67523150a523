use crate::{
    db_types::{Area, NewRestaurant, Restaurant, RestaurantId},
    foe_api::errors::EntityApiError,
};

#[allow(async_fn_in_trait)]
pub trait RestaurantManagement {
    /// Stores a new restaurant and returns it with its freshly generated id.
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, EntityApiError>;

    async fn fetch_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>, EntityApiError>;

    /// All the restaurants in the given area, ordered by name.
    async fn restaurants_in_area(&self, area: Area) -> Result<Vec<Restaurant>, EntityApiError>;
}
