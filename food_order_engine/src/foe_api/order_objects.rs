use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db_types::{CustomerId, FoodItem, NewOrder, RestaurantId, TransactionId};

/// What a customer asks for when placing an order. The customer is not part of the request; it is resolved from the
/// caller's credentials and supplied separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderRequest {
    pub food_item: FoodItem,
    pub transaction_id: TransactionId,
    pub restaurant_id: RestaurantId,
}

impl OrderRequest {
    pub fn new(food_item: FoodItem, transaction_id: TransactionId, restaurant_id: RestaurantId) -> Self {
        Self { food_item, transaction_id, restaurant_id }
    }

    pub fn for_customer(self, customer_id: CustomerId) -> NewOrder {
        NewOrder::new(self.food_item, self.transaction_id, self.restaurant_id, customer_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderQueryFilter {
    pub customer_id: Option<CustomerId>,
    pub restaurant_id: Option<RestaurantId>,
    pub transaction_id: Option<TransactionId>,
    pub food_item: Option<FoodItem>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl OrderQueryFilter {
    pub fn with_customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_restaurant_id(mut self, restaurant_id: RestaurantId) -> Self {
        self.restaurant_id = Some(restaurant_id);
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn with_food_item(mut self, food_item: FoodItem) -> Self {
        self.food_item = Some(food_item);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none() &&
            self.restaurant_id.is_none() &&
            self.transaction_id.is_none() &&
            self.food_item.is_none() &&
            self.since.is_none() &&
            self.until.is_none()
    }
}

impl Display for OrderQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "No filters.")?;
            return Ok(());
        }
        if let Some(customer_id) = &self.customer_id {
            write!(f, "customer_id: {customer_id}. ")?;
        }
        if let Some(restaurant_id) = &self.restaurant_id {
            write!(f, "restaurant_id: {restaurant_id}. ")?;
        }
        if let Some(transaction_id) = &self.transaction_id {
            write!(f, "transaction_id: {transaction_id}. ")?;
        }
        if let Some(food_item) = &self.food_item {
            write!(f, "food_item: {food_item}. ")?;
        }
        if let Some(since) = &self.since {
            write!(f, "since {since}. ")?;
        }
        if let Some(until) = &self.until {
            write!(f, "until {until}. ")?;
        }
        Ok(())
    }
}
