use chrono::{DateTime, Utc};
use food_order_engine::{
    db_types::{
        Area,
        Customer,
        CustomerId,
        NewCustomer,
        NewOrder,
        NewPayment,
        NewRestaurant,
        Order,
        OrderId,
        Payment,
        Restaurant,
        RestaurantId,
        TransactionId,
    },
    order_objects::OrderQueryFilter,
    report_objects::{CustomerOrderCount, DailyRevenue, ItemCount, TimeWindow},
    CustomerManagement,
    EntityApiError,
    OrderFlowError,
    OrderManagement,
    PaymentManagement,
    PriceCatalog,
    ReportError,
    ReportManagement,
    RestaurantManagement,
};
use fos_common::Rupees;
use mockall::mock;

use crate::{
    errors::AuthError,
    identity::{IdentityVerifier, VerifiedIdentity},
};

mock! {
    pub CustomerManager {}
    impl CustomerManagement for CustomerManager {
        async fn fetch_or_create_customer(&self, customer: NewCustomer) -> Result<Customer, EntityApiError>;
        async fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, EntityApiError>;
        async fn fetch_customer_by_subject(&self, subject_id: &str) -> Result<Option<Customer>, EntityApiError>;
    }
}

mock! {
    pub OrderManager {}
    impl OrderManagement for OrderManager {
        async fn process_new_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;
        async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, EntityApiError>;
        async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, EntityApiError>;
    }
}

mock! {
    pub PaymentManager {}
    impl PaymentManagement for PaymentManager {
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, EntityApiError>;
        async fn fetch_payment(&self, id: &TransactionId) -> Result<Option<Payment>, EntityApiError>;
    }
}

mock! {
    pub RestaurantManager {}
    impl RestaurantManagement for RestaurantManager {
        async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, EntityApiError>;
        async fn fetch_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>, EntityApiError>;
        async fn restaurants_in_area(&self, area: Area) -> Result<Vec<Restaurant>, EntityApiError>;
    }
}

mock! {
    pub ReportManager {}
    impl ReportManagement for ReportManager {
        async fn earnings_for_area(&self, area: Area, prices: &PriceCatalog, window: Option<TimeWindow>) -> Result<Rupees, ReportError>;
        async fn customer_order_counts(&self, limit: u32) -> Result<Vec<CustomerOrderCount>, ReportError>;
        async fn daily_revenue(&self, prices: &PriceCatalog, since: DateTime<Utc>) -> Result<Vec<DailyRevenue>, ReportError>;
        async fn item_counts_for_restaurant(&self, restaurant_id: &RestaurantId) -> Result<Vec<ItemCount>, ReportError>;
    }
}

mock! {
    pub Verifier {}
    impl IdentityVerifier for Verifier {
        fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, AuthError>;
    }
}
