use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Customer, CustomerId, NewCustomer},
};

/// Inserts the customer unless one with the same subject id already exists, then reads back whichever record is
/// stored. This is not atomic on its own. Run it inside a transaction and pass `&mut *tx` as the connection.
pub async fn idempotent_insert(
    customer: NewCustomer,
    conn: &mut SqliteConnection,
) -> Result<Customer, SqliteDatabaseError> {
    let id = CustomerId::random();
    let result = sqlx::query(
        r#"
            INSERT INTO customers (id, name, subject_id, age) VALUES ($1, $2, $3, $4)
            ON CONFLICT(subject_id) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(&customer.name)
    .bind(&customer.subject_id)
    .bind(customer.age)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() > 0 {
        debug!("🗃️ New customer {id} created for subject {}", customer.subject_id);
    } else {
        trace!("🗃️ Customer for subject {} already exists", customer.subject_id);
    }
    fetch_customer_by_subject(&customer.subject_id, conn).await?.ok_or_else(|| {
        SqliteDatabaseError::ConstraintViolation(format!("Customer for subject {} vanished", customer.subject_id))
    })
}

pub async fn fetch_customer(
    id: &CustomerId,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, SqliteDatabaseError> {
    let customer = sqlx::query_as::<_, Customer>("SELECT id, name, subject_id, age FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(customer)
}

pub async fn fetch_customer_by_subject(
    subject_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, SqliteDatabaseError> {
    let customer =
        sqlx::query_as::<_, Customer>("SELECT id, name, subject_id, age FROM customers WHERE subject_id = $1")
            .bind(subject_id)
            .fetch_optional(conn)
            .await?;
    Ok(customer)
}
