use crate::{
    db_types::{NewOrder, Order, OrderId},
    foe_api::{
        errors::{EntityApiError, OrderFlowError},
        order_objects::OrderQueryFilter,
    },
};

/// The `OrderManagement` trait defines the behaviour for placing and querying orders in the database backend.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Takes a new order, and in a single atomic transaction,
    /// * fetches the payment the order refers to. It must exist and must have succeeded.
    /// * fetches the restaurant the order refers to. It must exist.
    /// * stores the order. The backend assigns the order id and the creation timestamp.
    ///
    /// The checks are made with [`NewOrder::check_references`]. If any step fails, no order is stored.
    ///
    /// Returns the stored order.
    async fn process_new_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;

    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, EntityApiError>;

    /// Fetches orders according to the criteria in the `OrderQueryFilter`. Results are ordered by `created_at`,
    /// oldest first.
    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, EntityApiError>;
}
