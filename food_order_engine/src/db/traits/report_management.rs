use chrono::{DateTime, Utc};
use fos_common::Rupees;

use crate::{
    db_types::{Area, RestaurantId},
    foe_api::{
        errors::ReportError,
        report_objects::{CustomerOrderCount, DailyRevenue, ItemCount, TimeWindow},
    },
    PriceCatalog,
};

/// Read-only aggregate queries over orders, payments, restaurants and customers.
///
/// Every query that produces money only counts orders whose payment succeeded, and values each order with the
/// price of its food item in `prices`. Items that `prices` does not contain are valued at zero.
#[allow(async_fn_in_trait)]
pub trait ReportManagement {
    /// Sum of the prices of the orders placed at restaurants in `area`. If `window` is given, only orders created
    /// inside it are counted. Returns zero if nothing matches.
    async fn earnings_for_area(
        &self,
        area: Area,
        prices: &PriceCatalog,
        window: Option<TimeWindow>,
    ) -> Result<Rupees, ReportError>;

    /// Order counts grouped by customer name, largest first, ties broken by name. At most `limit` rows.
    async fn customer_order_counts(&self, limit: u32) -> Result<Vec<CustomerOrderCount>, ReportError>;

    /// Revenue per UTC day and area for orders created at or after `since`. Newest day first, then by area.
    async fn daily_revenue(&self, prices: &PriceCatalog, since: DateTime<Utc>)
        -> Result<Vec<DailyRevenue>, ReportError>;

    /// How many orders of each food item the restaurant has received, ordered by food item.
    async fn item_counts_for_restaurant(&self, restaurant_id: &RestaurantId) -> Result<Vec<ItemCount>, ReportError>;
}
