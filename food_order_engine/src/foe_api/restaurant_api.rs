use std::fmt::Debug;

use crate::{
    db::traits::RestaurantManagement,
    db_types::{Area, NewRestaurant, Restaurant, RestaurantId},
    foe_api::errors::EntityApiError,
};

pub struct RestaurantApi<B> {
    db: B,
}

impl<B: Debug> Debug for RestaurantApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RestaurantApi ({:?})", self.db)
    }
}

impl<B> RestaurantApi<B>
where B: RestaurantManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, EntityApiError> {
        self.db.insert_restaurant(restaurant).await
    }

    pub async fn fetch_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, EntityApiError> {
        self.db.fetch_restaurant(id).await?.ok_or_else(|| EntityApiError::not_found("Restaurant", id))
    }

    pub async fn restaurants_in_area(&self, area: Area) -> Result<Vec<Restaurant>, EntityApiError> {
        self.db.restaurants_in_area(area).await
    }
}
