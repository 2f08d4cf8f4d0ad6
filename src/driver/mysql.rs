//! MySQL / MariaDB driver binding.

use async_trait::async_trait;
use sqlx::MySqlPool;

use super::StatementDriver;
use crate::error::AdapterError;
use crate::record::PolicyRecord;

/// [`StatementDriver`] over a `sqlx::MySqlPool`.
#[derive(Debug, Clone)]
pub struct MySqlDriver {
    pool: MySqlPool,
}

impl MySqlDriver {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementDriver for MySqlDriver {
    async fn connect(&self) -> Result<(), AdapterError> {
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
