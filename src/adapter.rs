//! Storage adapter façade consumed by the policy engine.
//!
//! [`SqlAdapter`] is written once against the [`StatementDriver`]
//! contract: requests are shaped into [`PolicyRecord`] form, rendered by
//! the [`StatementBuilder`], executed by the bound driver, and decoded
//! back into rule tuples on the way out.

use futures_util::future::try_join_all;

use crate::config::AdapterConfig;
use crate::driver::{self, DatabaseClient, StatementDriver};
use crate::error::AdapterError;
use crate::model::{PolicyModel, RuleSink};
use crate::record::PolicyRecord;
use crate::schema;
use crate::statement::StatementBuilder;

/// Multi-backend SQL storage adapter for policy rules.
///
/// Owns its connection exclusively: opened once at construction, closed
/// exactly once by [`shutdown`](Self::shutdown), never shared across
/// adapter instances. Whether concurrent calls from independent call sites
/// are safe depends on the bound backend's own statement concurrency; the
/// pool-backed bindings used here allow it.
#[derive(Debug)]
pub struct SqlAdapter {
    driver: Box<dyn StatementDriver>,
    statements: StatementBuilder,
    log_statements: bool,
}

impl SqlAdapter {
    /// Binds `client`, probes the connection, and ensures the policy
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Connection`] if the connection probe fails
    /// and [`AdapterError::Execution`] if table creation is rejected.
    pub async fn new(client: DatabaseClient) -> Result<Self, AdapterError> {
        Self::with_config(client, AdapterConfig::default()).await
    }

    /// Like [`new`](Self::new), with explicit configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`new`](Self::new).
    pub async fn with_config(
        client: DatabaseClient,
        config: AdapterConfig,
    ) -> Result<Self, AdapterError> {
        let kind = client.kind();
        let adapter = Self {
            driver: driver::bind(client),
            statements: StatementBuilder::new(kind, &config.table_name),
            log_statements: config.log_statements,
        };
        adapter.driver.connect().await?;
        schema::ensure_table(adapter.driver.as_ref(), &adapter.statements).await?;
        tracing::info!(backend = ?kind, table = %config.table_name, "policy storage ready");
        Ok(adapter)
    }

    async fn run(&self, statement: String) -> Result<Vec<PolicyRecord>, AdapterError> {
        if self.log_statements {
            tracing::debug!(%statement, "executing policy statement");
        }
        self.driver.execute(&statement).await
    }

    /// Loads every stored rule into `sink`, one display line per row, in
    /// backend iteration order. Idempotent against an unchanged table.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Execution`] if the select fails.
    pub async fn load<S: RuleSink + ?Sized>(&self, sink: &mut S) -> Result<(), AdapterError> {
        let rows = self.run(self.statements.select_all()).await?;
        let count = rows.len();
        for row in &rows {
            sink.push_line(&row.to_display_line());
        }
        tracing::debug!(rules = count, "policies loaded");
        Ok(())
    }

    /// Replaces the whole table with the rules held by `model`.
    ///
    /// One delete-all, then one insert per rule across both sections, all
    /// inserts dispatched concurrently. The call completes once every
    /// insert has settled. The first failure propagates without undoing
    /// inserts that already applied — callers should treat a failed call
    /// as leaving mixed state and reconcile via [`load`](Self::load).
    ///
    /// Returns `true` on completion.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRule`] (before any I/O) if the model
    /// holds a rule with too many fields, or [`AdapterError::Execution`]
    /// if the delete or any insert fails.
    pub async fn save_all(&self, model: &PolicyModel) -> Result<bool, AdapterError> {
        // Validate every rule before the table is touched.
        let mut statements = Vec::with_capacity(model.len());
        for (ptype, rule) in model.rules() {
            let record = PolicyRecord::from_rule(ptype, rule)?;
            statements.push(self.statements.insert(&record));
        }

        self.run(self.statements.delete_all()).await?;
        try_join_all(statements.into_iter().map(|statement| self.run(statement))).await?;

        tracing::debug!(rules = model.len(), "policy table replaced");
        Ok(true)
    }

    /// Inserts exactly one rule.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRule`] if `rule` has more than six
    /// fields, or [`AdapterError::Execution`] if the insert fails.
    pub async fn add_one(&self, ptype: &str, rule: &[String]) -> Result<(), AdapterError> {
        let record = PolicyRecord::from_rule(ptype, rule)?;
        self.run(self.statements.insert(&record)).await?;
        Ok(())
    }

    /// Inserts each rule concurrently: no batching into one statement, no
    /// ordering guarantee among the inserts, fail-fast on the first
    /// rejection.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRule`] (before any statement is
    /// dispatched) if any rule has too many fields, or
    /// [`AdapterError::Execution`] if an insert fails.
    pub async fn add_many(&self, ptype: &str, rules: &[Vec<String>]) -> Result<(), AdapterError> {
        let mut statements = Vec::with_capacity(rules.len());
        for rule in rules {
            let record = PolicyRecord::from_rule(ptype, rule)?;
            statements.push(self.statements.insert(&record));
        }
        try_join_all(statements.into_iter().map(|statement| self.run(statement))).await?;
        Ok(())
    }

    /// Deletes rows matching `ptype` and exactly the given field values in
    /// the given slots. Slots past the rule's arity are unconstrained.
    /// Deleting a rule that does not exist succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRule`] if `rule` has more than six
    /// fields, or [`AdapterError::Execution`] if the delete fails.
    pub async fn remove_one(&self, ptype: &str, rule: &[String]) -> Result<(), AdapterError> {
        let record = PolicyRecord::from_rule(ptype, rule)?;
        self.run(self.statements.delete_matching(&record)).await?;
        Ok(())
    }

    /// Concurrent fan-out of [`remove_one`](Self::remove_one), one delete
    /// per rule.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`remove_one`](Self::remove_one); the first
    /// failure propagates without undoing deletes that already applied.
    pub async fn remove_many(&self, ptype: &str, rules: &[Vec<String>]) -> Result<(), AdapterError> {
        let mut statements = Vec::with_capacity(rules.len());
        for rule in rules {
            let record = PolicyRecord::from_rule(ptype, rule)?;
            statements.push(self.statements.delete_matching(&record));
        }
        try_join_all(statements.into_iter().map(|statement| self.run(statement))).await?;
        Ok(())
    }

    /// Deletes rows matching `ptype` plus `field_values[k]` at slot
    /// `field_index + k` for every in-range pair; slots outside the window
    /// are wildcards. Out-of-range pairs are silently clipped, so negative
    /// or overflowing indices never error.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Execution`] if the delete fails.
    pub async fn remove_filtered(
        &self,
        ptype: &str,
        field_index: isize,
        field_values: &[String],
    ) -> Result<(), AdapterError> {
        let record = PolicyRecord::from_filter(ptype, field_index, field_values);
        self.run(self.statements.delete_matching(&record)).await?;
        Ok(())
    }

    /// Closes the connection. Call exactly once; storage calls made after
    /// shutdown fail with [`AdapterError::Execution`].
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Connection`] if the backend fails to shut
    /// down cleanly. Such errors are typically non-fatal to the caller's
    /// own lifecycle.
    pub async fn shutdown(&self) -> Result<(), AdapterError> {
        self.driver.close().await?;
        tracing::info!("policy storage closed");
        Ok(())
    }
}
