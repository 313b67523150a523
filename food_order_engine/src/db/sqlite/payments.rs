use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewPayment, Payment, TransactionId},
};

pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, SqliteDatabaseError> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
            INSERT INTO payments (transaction_id, status, payment_type) VALUES ($1, $2, $3)
            RETURNING transaction_id, status, payment_type, created_at
        "#,
    )
    .bind(TransactionId::random())
    .bind(payment.status)
    .bind(payment.payment_type)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment {} ({}, {}) saved", payment.transaction_id, payment.payment_type, payment.status);
    Ok(payment)
}

pub async fn fetch_payment(
    id: &TransactionId,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, SqliteDatabaseError> {
    let payment = sqlx::query_as::<_, Payment>(
        "SELECT transaction_id, status, payment_type, created_at FROM payments WHERE transaction_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(payment)
}
