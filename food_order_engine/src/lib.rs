//! Food Order Engine
//!
//! The food order engine places orders against recorded payments and restaurants, and computes revenue and customer
//! reports from the stored orders.
//!
//! The library is divided into three main sections:
//! 1. Database management and control (`db`). SQLite is the supported backend. You should never need to access
//!    the database directly. Instead, use the public API provided by the engine. The exception is the data types used
//!    in the database. These are defined in the `db_types` module and are public.
//! 2. The price catalog ([`mod@price_catalog`]). Orders do not store a price, so the catalog is handed to the
//!    [`ReportingApi`] and applied whenever money is aggregated.
//! 3. The engine public API (`foe_api`). This provides order placement, reporting, and creation and lookup of
//!    customers, restaurants and payments. Backends implement the backend traits (such as [`OrderManagement`] and
//!    [`ReportManagement`]) to be usable by it.
mod db;

pub mod db_types;
mod foe_api;
pub mod price_catalog;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{db_timestamp, run_migrations, SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{CustomerManagement, OrderManagement, PaymentManagement, ReportManagement, RestaurantManagement};
pub use foe_api::{
    customer_api::CustomerApi,
    errors::{EntityApiError, OrderFlowError, ReportError},
    order_flow_api::OrderFlowApi,
    order_objects,
    payment_api::PaymentApi,
    report_objects,
    reporting_api::ReportingApi,
    restaurant_api::RestaurantApi,
};
pub use price_catalog::{CatalogError, PriceCatalog};
