use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::schema;
use crate::database::transaction::Tx;
use crate::filter::FilterError;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DatabaseError::UniqueViolation(db.message().to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Connection pool for the application database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.url.starts_with("sqlite:") {
            return Err(DatabaseError::InvalidDatabaseUrl(format!(
                "expected a sqlite: URL, got '{}'",
                config.url
            )));
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);
        if !Self::is_in_memory(&config.url) {
            // Writers wait for the lock instead of failing with SQLITE_BUSY
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(config.connection_timeout));
        }

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // Every connection to :memory: opens a fresh database, so keep exactly one alive
        if Self::is_in_memory(&config.url) {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        info!("Connected to database: {}", config.url);
        Ok(Self { pool })
    }

    /// Create tables and indexes that do not exist yet
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Start a request-scoped write transaction (`BEGIN IMMEDIATE`)
    pub async fn begin(&self) -> Result<Tx, DatabaseError> {
        Tx::begin(self.acquire().await?).await
    }

    /// Pooled connection for reads; each statement runs in its own implicit transaction
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DatabaseError> {
        Ok(self.pool.acquire().await?)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}
