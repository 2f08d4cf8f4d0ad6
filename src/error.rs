//! Adapter error types.
//!
//! [`AdapterError`] is the single error enum surfaced by every storage
//! operation. The adapter performs no retries and no silent suppression:
//! failures propagate to the policy engine as failed operations. Fan-out
//! operations propagate the first failure without undoing already-applied
//! statements, so callers should reconcile a failed bulk write by
//! re-reading storage.

use crate::record::MAX_RULE_FIELDS;

/// Errors surfaced by the storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A rule carried more positional fields than the table has slots.
    ///
    /// Raised before any I/O is issued.
    #[error("rule for ptype '{ptype}' has {count} fields; the policy table holds at most {}", MAX_RULE_FIELDS)]
    InvalidRule {
        /// Type discriminator of the offending rule.
        ptype: String,
        /// Number of fields the rule carried.
        count: usize,
    },

    /// The backend rejected a statement.
    ///
    /// Carries the rendered statement text for diagnostics. The `Display`
    /// impl deliberately omits it: statement text embeds policy data and is
    /// not assumed safe for log sinks.
    #[error("statement execution failed: {source}")]
    Execution {
        /// The rendered statement that failed.
        statement: String,
        /// Underlying driver error.
        #[source]
        source: sqlx::Error,
    },

    /// Establishing or probing the database connection failed.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rule_names_ptype_and_count() {
        let err = AdapterError::InvalidRule {
            ptype: "p2".to_string(),
            count: 9,
        };
        let message = err.to_string();
        assert!(message.contains("p2"));
        assert!(message.contains('9'));
        assert!(message.contains('6'));
    }

    #[test]
    fn execution_display_omits_statement_text() {
        let err = AdapterError::Execution {
            statement: "SELECT \"v0\" FROM \"casbin_rule\"".to_string(),
            source: sqlx::Error::PoolClosed,
        };
        assert!(!err.to_string().contains("casbin_rule"));
    }

    #[test]
    fn execution_keeps_statement_for_diagnostics() {
        let err = AdapterError::Execution {
            statement: "DELETE FROM \"casbin_rule\"".to_string(),
            source: sqlx::Error::PoolClosed,
        };
        let AdapterError::Execution { statement, .. } = err else {
            panic!("wrong variant");
        };
        assert!(statement.contains("casbin_rule"));
    }
}
