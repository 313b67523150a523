use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::CustomerManagement,
    db_types::{Customer, CustomerId, NewCustomer},
    foe_api::errors::EntityApiError,
};

/// Creates customers the first time an identity-provider subject signs in, and looks them up afterwards.
pub struct CustomerApi<B> {
    db: B,
}

impl<B: Debug> Debug for CustomerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomerApi ({:?})", self.db)
    }
}

impl<B> CustomerApi<B>
where B: CustomerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Returns the customer for the verified subject, creating one on first sign-in. Signing in twice with the same
    /// subject always yields the same customer id.
    pub async fn customer_for_subject(&self, subject_id: &str, name: &str) -> Result<Customer, EntityApiError> {
        let customer = self.db.fetch_or_create_customer(NewCustomer::new(name, subject_id)).await?;
        debug!("🧑️ Subject {subject_id} resolved to customer {}", customer.id);
        Ok(customer)
    }

    pub async fn fetch_customer(&self, id: &CustomerId) -> Result<Customer, EntityApiError> {
        self.db.fetch_customer(id).await?.ok_or_else(|| EntityApiError::not_found("Customer", id))
    }
}
