use std::fmt::Debug;

use chrono::{DateTime, Utc};
use fos_common::Rupees;
use log::*;

use crate::{
    db::traits::ReportManagement,
    db_types::{Area, RestaurantId},
    foe_api::{
        errors::ReportError,
        report_objects::{
            trailing_days,
            CustomerOrderCount,
            DailyRevenue,
            ItemCount,
            TimeWindow,
            DAILY_REVENUE_DAYS,
            DEFAULT_TOP_CUSTOMERS_LIMIT,
        },
    },
    PriceCatalog,
};

/// The reporting engine. Every report is a read-only function of the stored orders and the current time, so calling
/// a report twice with nothing written in between gives the same answer.
///
/// Orders are valued with the [`PriceCatalog`] given to [`ReportingApi::new`]. Reports that depend on the current time
/// have an `_at` variant that takes the reference time explicitly.
pub struct ReportingApi<B> {
    db: B,
    prices: PriceCatalog,
    veg_prices: PriceCatalog,
    top_customers_limit: u32,
}

impl<B: Debug> Debug for ReportingApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReportingApi ({:?})", self.db)
    }
}

impl<B> ReportingApi<B> {
    pub fn new(db: B, prices: PriceCatalog) -> Self {
        let veg_prices = prices.veg_subset();
        Self { db, prices, veg_prices, top_customers_limit: DEFAULT_TOP_CUSTOMERS_LIMIT }
    }

    pub fn with_top_customers_limit(mut self, limit: u32) -> Self {
        self.top_customers_limit = limit;
        self
    }

    pub fn prices(&self) -> &PriceCatalog {
        &self.prices
    }
}

impl<B> ReportingApi<B>
where B: ReportManagement
{
    /// Earnings from successful orders at restaurants in `area` during the previous calendar month.
    pub async fn earnings_last_month(&self, area: Area) -> Result<Rupees, ReportError> {
        self.earnings_last_month_at(area, Utc::now()).await
    }

    pub async fn earnings_last_month_at(&self, area: Area, now: DateTime<Utc>) -> Result<Rupees, ReportError> {
        let window = TimeWindow::previous_calendar_month(now);
        let total = self.db.earnings_for_area(area, &self.prices, Some(window)).await?;
        debug!("📊️ Earnings in {area} for {window}: {total}");
        Ok(total)
    }

    /// All-time earnings in `area` from the vegetarian items only.
    pub async fn subset_earnings(&self, area: Area) -> Result<Rupees, ReportError> {
        let total = self.db.earnings_for_area(area, &self.veg_prices, None).await?;
        debug!("📊️ Veg earnings in {area}: {total}");
        Ok(total)
    }

    /// The customers with the most orders, most first. Ties are broken by name.
    pub async fn top_customers(&self) -> Result<Vec<CustomerOrderCount>, ReportError> {
        let rows = self.db.customer_order_counts(self.top_customers_limit).await?;
        debug!("📊️ Top customers: {} rows", rows.len());
        Ok(rows)
    }

    /// Revenue per day and area over the trailing seven days.
    pub async fn daily_revenue_7days(&self) -> Result<Vec<DailyRevenue>, ReportError> {
        self.daily_revenue_7days_at(Utc::now()).await
    }

    pub async fn daily_revenue_7days_at(&self, now: DateTime<Utc>) -> Result<Vec<DailyRevenue>, ReportError> {
        let since = trailing_days(now, DAILY_REVENUE_DAYS);
        let rows = self.db.daily_revenue(&self.prices, since).await?;
        debug!("📊️ Daily revenue since {since}: {} rows", rows.len());
        Ok(rows)
    }

    /// How many successful orders of each item the restaurant has had. Unknown restaurants give an empty summary.
    pub async fn restaurant_summary(&self, restaurant_id: &RestaurantId) -> Result<Vec<ItemCount>, ReportError> {
        self.db.item_counts_for_restaurant(restaurant_id).await
    }
}
