use std::fmt::Debug;

use chrono::{DateTime, Utc};
use fos_common::Rupees;
use log::*;
use sqlx::{SqliteConnection, SqlitePool};

use super::{
    customers,
    db_url,
    max_connections,
    new_pool,
    orders,
    payments,
    reports,
    restaurants,
    SqliteDatabaseError,
    WriteTransaction,
};
use crate::{
    db::traits::{CustomerManagement, OrderManagement, PaymentManagement, ReportManagement, RestaurantManagement},
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
    foe_api::{
        errors::{EntityApiError, OrderFlowError, ReportError},
        order_objects::OrderQueryFilter,
        report_objects::{CustomerOrderCount, DailyRevenue, ItemCount, TimeWindow},
    },
    PriceCatalog,
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the `FOS_DATABASE_URL` and `FOS_DB_MAX_CONNECTIONS` environment
    /// variables.
    pub async fn new() -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections()).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        super::run_migrations(&self.pool).await
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn fetch_or_create_customer(&self, customer: NewCustomer) -> Result<Customer, EntityApiError> {
        let mut tx = self.pool.begin().await.map_err(SqliteDatabaseError::from)?;
        let customer = customers::idempotent_insert(customer, &mut tx).await?;
        tx.commit().await.map_err(SqliteDatabaseError::from)?;
        Ok(customer)
    }

    async fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let customer = customers::fetch_customer(id, &mut conn).await?;
        Ok(customer)
    }

    async fn fetch_customer_by_subject(&self, subject_id: &str) -> Result<Option<Customer>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let customer = customers::fetch_customer_by_subject(subject_id, &mut conn).await?;
        Ok(customer)
    }
}

impl RestaurantManagement for SqliteDatabase {
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let restaurant = restaurants::insert_restaurant(restaurant, &mut conn).await?;
        Ok(restaurant)
    }

    async fn fetch_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let restaurant = restaurants::fetch_restaurant(id, &mut conn).await?;
        Ok(restaurant)
    }

    async fn restaurants_in_area(&self, area: Area) -> Result<Vec<Restaurant>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let result = restaurants::restaurants_in_area(area, &mut conn).await?;
        Ok(result)
    }
}

impl PaymentManagement for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let payment = payments::insert_payment(payment, &mut conn).await?;
        Ok(payment)
    }

    async fn fetch_payment(&self, id: &TransactionId) -> Result<Option<Payment>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let payment = payments::fetch_payment(id, &mut conn).await?;
        Ok(payment)
    }
}

impl OrderManagement for SqliteDatabase {
    /// Takes a new order, and in a single atomic write transaction,
    /// * reads the payment and restaurant the order refers to,
    /// * checks them with [`NewOrder::check_references`],
    /// * inserts the order.
    ///
    /// The write lock is held from the first read, so concurrent placements queue behind each other. A rejected order
    /// is rolled back and leaves nothing behind.
    async fn process_new_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        let mut tx = WriteTransaction::begin(&self.pool).await?;
        let result = validate_and_insert(order, tx.connection()?).await;
        match result {
            Ok(order) => {
                tx.commit().await?;
                Ok(order)
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("🗃️ Could not roll back a rejected order. {rollback_err}");
                }
                Err(e)
            },
        }
    }

    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let order = orders::fetch_order(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, EntityApiError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let orders = orders::fetch_orders(query, &mut conn).await?;
        Ok(orders)
    }
}

impl ReportManagement for SqliteDatabase {
    async fn earnings_for_area(
        &self,
        area: Area,
        prices: &PriceCatalog,
        window: Option<TimeWindow>,
    ) -> Result<Rupees, ReportError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let total = reports::earnings_for_area(area, prices, window, &mut conn).await?;
        Ok(total)
    }

    async fn customer_order_counts(&self, limit: u32) -> Result<Vec<CustomerOrderCount>, ReportError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let rows = reports::customer_order_counts(limit, &mut conn).await?;
        Ok(rows)
    }

    async fn daily_revenue(
        &self,
        prices: &PriceCatalog,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailyRevenue>, ReportError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let rows = reports::daily_revenue(prices, since, &mut conn).await?;
        Ok(rows)
    }

    async fn item_counts_for_restaurant(&self, restaurant_id: &RestaurantId) -> Result<Vec<ItemCount>, ReportError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let rows = reports::item_counts_for_restaurant(restaurant_id, &mut conn).await?;
        Ok(rows)
    }
}

async fn validate_and_insert(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderFlowError> {
    let payment = payments::fetch_payment(&order.transaction_id, conn).await?;
    let restaurant = restaurants::fetch_restaurant(&order.restaurant_id, conn).await?;
    order.check_references(payment.as_ref(), restaurant.as_ref())?;
    let order = orders::insert_order(order, conn).await?;
    Ok(order)
}
