use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};

use crate::database::manager::DatabaseError;

const EXPECT_MSG: &str = "BUG: transaction used after commit or rollback";

/// Write transaction scoped to a single request.
///
/// Opened with `BEGIN IMMEDIATE`, so the write lock is taken up front and the
/// existence checks a handler runs before writing see the latest committed
/// state. Concurrent writers queue on SQLite's busy timeout instead of failing
/// at their first write. Rolls back on drop unless committed.
pub struct Tx {
    conn: Option<PoolConnection<Sqlite>>,
}

impl Tx {
    pub(crate) async fn begin(mut conn: PoolConnection<Sqlite>) -> Result<Self, DatabaseError> {
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        Ok(Self { conn: Some(conn) })
    }

    pub async fn commit(mut self) -> Result<(), DatabaseError> {
        self.finish("COMMIT").await
    }

    pub async fn rollback(mut self) -> Result<(), DatabaseError> {
        self.finish("ROLLBACK").await
    }

    async fn finish(&mut self, statement: &'static str) -> Result<(), DatabaseError> {
        let Some(mut conn) = self.conn.take() else {
            return Ok(());
        };
        match sqlx::query(statement).execute(&mut *conn).await {
            Ok(_) => Ok(()),
            Err(e) => {
                // The transaction state is unknown; never hand this connection back to the pool
                discard(conn);
                Err(e.into())
            }
        }
    }
}

impl Deref for Tx {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        self.conn.as_deref().expect(EXPECT_MSG)
    }
}

impl DerefMut for Tx {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        self.conn.as_deref_mut().expect(EXPECT_MSG)
    }
}

impl Drop for Tx {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(rollback_on_drop(conn));
            }
            Err(_) => discard(conn),
        }
    }
}

async fn rollback_on_drop(mut conn: PoolConnection<Sqlite>) {
    if let Err(e) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
        tracing::warn!("Rollback of abandoned transaction failed: {}", e);
        discard(conn);
    }
}

/// Closing the raw connection ends any open transaction in SQLite.
fn discard(conn: PoolConnection<Sqlite>) {
    drop(conn.detach());
}
