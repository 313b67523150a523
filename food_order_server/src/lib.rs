//! # Food order server
//! This crate hosts the HTTP server for the food ordering backend. It is responsible for:
//! * Signing customers in with an identity-provider ID token and issuing bearer access tokens.
//! * Accepting orders against successful payments.
//! * Serving the revenue and order reports.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/auth/login`, `/auth/verify-token`: Sign-in and token checks.
//! * `/orders`, `/orders/{order_id}`: Place orders and read them back.
//! * `/orders/reports/...`: The reporting endpoints.
//! * `/payments`, `/restaurants`: Record and look up payments and restaurants.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod identity;
pub mod routes;
pub mod server;
