//! Embedded SQLite driver binding.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::StatementDriver;
use crate::error::AdapterError;
use crate::record::PolicyRecord;

/// [`StatementDriver`] over a `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    pool: SqlitePool,
}

impl SqliteDriver {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementDriver for SqliteDriver {
    async fn connect(&self) -> Result<(), AdapterError> {
        // SQLite opens its database on first statement; nothing to probe.
        Ok(())
    }

    async fn execute(&self, statement: &str) -> Result<Vec<PolicyRecord>, AdapterError> {
        sqlx::query_as::<_, PolicyRecord>(statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| AdapterError::Execution {
                statement: statement.to_string(),
                source,
            })
    }

    async fn close(&self) -> Result<(), AdapterError> {
        self.pool.close().await;
        Ok(())
    }
}
