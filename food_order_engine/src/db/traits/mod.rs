//! #  Database management and control.
//!
//! This module provides the interfaces that define the contracts of the food order engine database *backends*.
//!
//! A backend stores four kinds of records: customers, restaurants, payments and orders. Orders reference exactly one
//! of each of the others. Nothing is ever updated or deleted, so the traits only describe inserts, lookups and
//! aggregate reads.
//!
//! ## Traits
//! * [`CustomerManagement`] creates customers on first sign-in and looks them up.
//! * [`RestaurantManagement`] registers restaurants and looks them up.
//! * [`PaymentManagement`] records payments and looks them up.
//! * [`OrderManagement`] places orders atomically against a payment and a restaurant, and queries them.
//! * [`ReportManagement`] runs the grouped and aggregated report queries. Monetary aggregates are priced with the
//!   [`crate::PriceCatalog`] passed in by the caller, since orders do not store a price.
mod customer_management;
mod order_management;
mod payment_management;
mod report_management;
mod restaurant_management;

pub use customer_management::CustomerManagement;
pub use order_management::OrderManagement;
pub use payment_management::PaymentManagement;
pub use report_management::ReportManagement;
pub use restaurant_management::RestaurantManagement;
