use thiserror::Error;

use crate::db_types::{RestaurantId, TransactionId};

/// Reasons an order cannot be placed. Every variant is terminal for the request that caused it.
#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Payment not found: {0}")]
    PaymentNotFound(TransactionId),
    #[error("Payment not successful: {0}")]
    PaymentNotSuccessful(TransactionId),
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum EntityApiError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl EntityApiError {
    pub fn not_found<S: ToString>(kind: &'static str, id: S) -> Self {
        Self::NotFound(kind, id.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
