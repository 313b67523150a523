use thiserror::Error;

use crate::foe_api::errors::{EntityApiError, OrderFlowError, ReportError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(sqlx::Error),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("The transaction has already been committed or rolled back")]
    TransactionClosed,
    #[error("Could not run database migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for SqliteDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() || db_err.is_foreign_key_violation() => {
                Self::ConstraintViolation(db_err.message().to_string())
            },
            _ => Self::DriverError(e),
        }
    }
}

impl From<SqliteDatabaseError> for OrderFlowError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::ConstraintViolation(msg) => OrderFlowError::ConstraintViolation(msg),
            e => OrderFlowError::DatabaseError(e.to_string()),
        }
    }
}

impl From<SqliteDatabaseError> for EntityApiError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::ConstraintViolation(msg) => EntityApiError::ConstraintViolation(msg),
            e => EntityApiError::DatabaseError(e.to_string()),
        }
    }
}

impl From<SqliteDatabaseError> for ReportError {
    fn from(e: SqliteDatabaseError) -> Self {
        ReportError::DatabaseError(e.to_string())
    }
}
