//! # casbin-sql-adapter
//!
//! Multi-backend SQL storage adapter for Casbin-style authorization
//! policies.
//!
//! Policy rules (permission rules and role groupings) are persisted to a
//! single relational table so they survive process restarts and can be
//! shared across application instances. Rule matching and effect
//! evaluation stay in the host policy engine — this crate only stores and
//! retrieves raw rule tuples.
//!
//! ## Architecture
//!
//! ```text
//! Policy engine
//!     │
//!     ├── SqlAdapter (adapter)           load / save_all / add / remove
//!     ├── PolicyRecord codec (record)    rule tuple ↔ fixed-width row
//!     ├── StatementBuilder (statement)   sea-query dialect rendering
//!     │
//!     └── StatementDriver (driver)       connect / execute / close
//!         ├── PostgresDriver (sqlx::PgPool)
//!         ├── MySqlDriver    (sqlx::MySqlPool)
//!         └── SqliteDriver   (sqlx::SqlitePool)
//! ```
//!
//! The adapter is handed an already-configured `sqlx` pool wrapped in a
//! [`DatabaseClient`]; it probes the connection, ensures the policy table,
//! and from then on every operation flows through the same three-step
//! path: shape the request into a [`PolicyRecord`], render a statement for
//! the bound dialect, execute it through the driver contract.

pub mod adapter;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod record;
pub mod schema;
pub mod statement;

pub use adapter::SqlAdapter;
pub use config::{AdapterConfig, DEFAULT_TABLE_NAME};
pub use driver::{DatabaseClient, DatabaseKind, StatementDriver};
pub use error::AdapterError;
pub use model::{PolicyModel, RuleSink};
pub use record::{MAX_RULE_FIELDS, PolicyRecord};
