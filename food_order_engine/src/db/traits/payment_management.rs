use crate::{
    db_types::{NewPayment, Payment, TransactionId},
    foe_api::errors::EntityApiError,
};

/// Payments are recorded as given; their status is never computed or changed by the engine.
#[allow(async_fn_in_trait)]
pub trait PaymentManagement {
    /// Stores a new payment. The backend assigns the transaction id and the creation timestamp.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, EntityApiError>;

    async fn fetch_payment(&self, id: &TransactionId) -> Result<Option<Payment>, EntityApiError>;
}
