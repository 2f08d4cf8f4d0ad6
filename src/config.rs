//! Adapter configuration loaded from environment variables.
//!
//! Follows 12-factor style: settings come from environment variables (or a
//! `.env` file via `dotenvy`). Connection strings and credentials are not
//! configured here — callers construct the native pool themselves and hand
//! it to the adapter.

/// Default policy table name.
pub const DEFAULT_TABLE_NAME: &str = "casbin_rule";

/// Storage adapter configuration.
///
/// Loaded via [`AdapterConfig::from_env`] or assembled directly.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Name of the policy table.
    pub table_name: String,

    /// Whether rendered statement text may be written to the log.
    ///
    /// Off by default: statements embed policy data.
    pub log_statements: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_statements: false,
        }
    }
}

impl AdapterConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads `CASBIN_TABLE_NAME` and `CASBIN_LOG_STATEMENTS`, falling back
    /// to defaults for unset or unparsable values. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let table_name = std::env::var("CASBIN_TABLE_NAME")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let log_statements = parse_env_bool("CASBIN_LOG_STATEMENTS", false);

        Self {
            table_name,
            log_statements,
        }
    }

    /// Replaces the table name.
    #[must_use]
    pub fn with_table_name(mut self, table_name: &str) -> Self {
        self.table_name = table_name.to_string();
        self
    }
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
