use crate::{
    db_types::{Customer, CustomerId, NewCustomer},
    foe_api::errors::EntityApiError,
};

/// The `CustomerManagement` trait defines behaviour for creating and fetching customers.
///
/// Customers are keyed by the subject id their identity provider issues. A customer is created the first time that
/// subject signs in, and the same record is returned on every later sign-in.
#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    /// Returns the customer with the given subject id, creating it from `customer` if it does not exist yet.
    ///
    /// Concurrent calls for the same subject id must resolve to the same customer record.
    async fn fetch_or_create_customer(&self, customer: NewCustomer) -> Result<Customer, EntityApiError>;

    async fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, EntityApiError>;

    async fn fetch_customer_by_subject(&self, subject_id: &str) -> Result<Option<Customer>, EntityApiError>;
}
