use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::OrderManagement,
    db_types::{CustomerId, Order, OrderId},
    foe_api::{
        errors::{EntityApiError, OrderFlowError},
        order_objects::{OrderQueryFilter, OrderRequest},
    },
};

/// `OrderFlowApi` is the order placement service. Orders are only accepted against a successful payment and an
/// existing restaurant, and the checks and the insert happen in one transaction in the backend.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({:?})", self.db)
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Places a new order on behalf of `caller`.
    ///
    /// The order is rejected with
    /// * [`OrderFlowError::PaymentNotFound`] if the payment does not exist,
    /// * [`OrderFlowError::PaymentNotSuccessful`] if the payment failed,
    /// * [`OrderFlowError::RestaurantNotFound`] if the restaurant does not exist,
    /// * [`OrderFlowError::ConstraintViolation`] if the payment already backs another order.
    ///
    /// Rejections are final; nothing is stored and nothing is retried.
    pub async fn place_order(&self, request: OrderRequest, caller: CustomerId) -> Result<Order, OrderFlowError> {
        let txid = request.transaction_id.clone();
        trace!("🔄️📦️ Placing order for {} against payment {txid} for customer {caller}", request.food_item);
        match self.db.process_new_order(request.for_customer(caller)).await {
            Ok(order) => {
                info!("🔄️📦️ Order {} placed against payment {txid}", order.order_id);
                Ok(order)
            },
            Err(e) => {
                warn!("🔄️📦️ Order against payment {txid} was rejected. {e}");
                Err(e)
            },
        }
    }

    /// Fetches an order. Customers can only see their own orders, so an order that belongs to someone else is
    /// reported as not found.
    pub async fn fetch_order_for_customer(
        &self,
        order_id: &OrderId,
        customer_id: &CustomerId,
    ) -> Result<Order, EntityApiError> {
        match self.db.fetch_order(order_id).await? {
            Some(order) if &order.customer_id == customer_id => Ok(order),
            Some(_) => {
                debug!("🔄️📦️ Customer {customer_id} asked for order {order_id}, which is not theirs");
                Err(EntityApiError::not_found("Order", order_id))
            },
            None => Err(EntityApiError::not_found("Order", order_id)),
        }
    }

    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Order, EntityApiError> {
        self.db.fetch_order(order_id).await?.ok_or_else(|| EntityApiError::not_found("Order", order_id))
    }

    pub async fn orders_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<Order>, EntityApiError> {
        self.search_orders(OrderQueryFilter::default().with_customer_id(customer_id.clone())).await
    }

    pub async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, EntityApiError> {
        trace!("🔄️📦️ Searching orders. {query}");
        self.db.search_orders(query).await
    }
}
