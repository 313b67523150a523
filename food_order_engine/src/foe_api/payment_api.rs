use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::PaymentManagement,
    db_types::{NewPayment, Payment, TransactionId},
    foe_api::errors::EntityApiError,
};

/// Records payments. The outcome of a payment is supplied by the caller and stored as is.
pub struct PaymentApi<B> {
    db: B,
}

impl<B: Debug> Debug for PaymentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentApi ({:?})", self.db)
    }
}

impl<B> PaymentApi<B>
where B: PaymentManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn record_payment(&self, payment: NewPayment) -> Result<Payment, EntityApiError> {
        let payment = self.db.insert_payment(payment).await?;
        debug!("💰️ Payment {} recorded with status {}", payment.transaction_id, payment.status);
        Ok(payment)
    }

    pub async fn fetch_payment(&self, id: &TransactionId) -> Result<Payment, EntityApiError> {
        self.db.fetch_payment(id).await?.ok_or_else(|| EntityApiError::not_found("Payment", id))
    }
}
