//! Idempotent policy-table creation.
//!
//! Creation is the only schema management the adapter performs: an
//! existing table is left untouched regardless of its shape, and schema
//! evolution is out of scope.

use crate::driver::StatementDriver;
use crate::error::AdapterError;
use crate::statement::StatementBuilder;

/// Creates the policy table if it does not already exist.
///
/// Safe to run repeatedly against the same backend: the DDL is guarded
/// with `IF NOT EXISTS` and never alters an existing table.
///
/// # Errors
///
/// Returns [`AdapterError::Execution`] if the backend rejects the DDL.
pub async fn ensure_table(
    driver: &dyn StatementDriver,
    statements: &StatementBuilder,
) -> Result<(), AdapterError> {
    driver.execute(&statements.create_table()).await?;
    tracing::debug!("policy table ensured");
    Ok(())
}
