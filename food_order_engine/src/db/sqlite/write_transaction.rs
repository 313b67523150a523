use log::*;
use sqlx::{pool::PoolConnection, Sqlite, SqliteConnection, SqlitePool};

use super::SqliteDatabaseError;

/// A transaction opened with `BEGIN IMMEDIATE`.
///
/// SQLite's deferred transactions (what `Pool::begin` gives you) take a read snapshot first and only ask for the write
/// lock on the first write. If another writer commits in between, the upgrade fails at once with `SQLITE_BUSY_SNAPSHOT`
/// and the busy timeout is never consulted. Taking the write lock at `BEGIN` makes concurrent read-then-write units
/// queue on the busy timeout instead.
///
/// The transaction must be finished with [`WriteTransaction::commit`] or [`WriteTransaction::rollback`]. If it is
/// dropped while still open, the connection is detached from the pool and closed, which rolls it back.
pub struct WriteTransaction {
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTransaction {
    pub async fn begin(pool: &SqlitePool) -> Result<Self, SqliteDatabaseError> {
        let mut conn = pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        trace!("🗃️ Write transaction started");
        Ok(Self { conn: Some(conn) })
    }

    pub fn connection(&mut self) -> Result<&mut SqliteConnection, SqliteDatabaseError> {
        self.conn.as_deref_mut().ok_or(SqliteDatabaseError::TransactionClosed)
    }

    pub async fn commit(mut self) -> Result<(), SqliteDatabaseError> {
        self.finish("COMMIT").await
    }

    pub async fn rollback(mut self) -> Result<(), SqliteDatabaseError> {
        self.finish("ROLLBACK").await
    }

    // The connection only goes back to the pool once the statement has succeeded. On failure it stays in `self` and
    // `Drop` discards it.
    async fn finish(&mut self, statement: &'static str) -> Result<(), SqliteDatabaseError> {
        sqlx::query(statement).execute(self.connection()?).await?;
        self.conn = None;
        trace!("🗃️ Write transaction ended with {statement}");
        Ok(())
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            warn!("🗃️ A write transaction was abandoned before it finished. Closing its connection.");
            drop(conn.detach());
        }
    }
}
