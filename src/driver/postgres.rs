//! PostgreSQL driver binding.

use async_trait::async_trait;
use sqlx::PgPool;

use super::StatementDriver;
use crate::error::AdapterError;
use crate::record::PolicyRecord;

/// [`StatementDriver`] over a `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresDriver {
    pool: PgPool,
}

impl PostgresDriver {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementDriver for PostgresDriver {
    async fn connect(&self) -> Result<(), AdapterError> {
        // Pools hand out connections lazily; probe one so a bad
        // configuration fails at construction, not on first use.
        self.pool.acquire().await.map_err(AdapterError::Connection)?;
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
