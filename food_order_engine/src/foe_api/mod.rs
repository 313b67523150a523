//! # Food order engine public API
//!
//! The `foe_api` module exposes the programmatic API for the food order engine.
//! The API is modular, so that clients of the API can pick and choose the functionality they want.
//!
//! * [`order_flow_api`] is the order placement service. It validates new orders against the payment and restaurant
//!   they reference and stores them.
//! * [`reporting_api`] computes the revenue and customer reports. It owns the [`crate::PriceCatalog`] used to value
//!   orders.
//! * [`customer_api`], [`restaurant_api`] and [`payment_api`] create and look up the other entities.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a database backend that
//! implements the specific backend traits required by the API.
//!
//! ```rust,ignore
//! use food_order_engine::{PriceCatalog, ReportingApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements ReportManagement
//! let api = ReportingApi::new(db, PriceCatalog::standard());
//! let total = api.earnings_last_month(Area::Mumbai).await?;
//! ```

pub mod customer_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod payment_api;
pub mod report_objects;
pub mod reporting_api;
pub mod restaurant_api;
