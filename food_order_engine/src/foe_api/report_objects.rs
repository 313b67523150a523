use std::fmt::Display;

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};
use fos_common::Rupees;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db_types::{Area, FoodItem};

pub const DEFAULT_TOP_CUSTOMERS_LIMIT: u32 = 3;
pub const DAILY_REVENUE_DAYS: i64 = 7;

//--------------------------------------      TimeWindow       ---------------------------------------------------------
/// A half-open interval of time, `[since, until)`, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    /// The whole calendar month before the one containing `now`: from midnight on the first day of the previous month
    /// up to (but excluding) midnight on the first day of the current month.
    pub fn previous_calendar_month(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let first_of_this_month = today - Days::new(u64::from(today.day0()));
        let first_of_last_month = first_of_this_month - Months::new(1);
        Self { since: start_of_day(first_of_last_month), until: start_of_day(first_of_this_month) }
    }

    pub fn contains(&self, t: &DateTime<Utc>) -> bool {
        &self.since <= t && t < &self.until
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.since, self.until)
    }
}

/// The start of the trailing window of `days` days ending at `now`.
pub fn trailing_days(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

//--------------------------------------     Report rows       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerOrderCount {
    pub name: String,
    pub orders_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub area: Area,
    pub revenue: Rupees,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ItemCount {
    pub food_item: FoodItem,
    pub count: i64,
}
