//! SQLite persistence for Aware.
//!
//! This crate provides the diesel schema, row models and the
//! [`PolicyStore`](aware_interface::PolicyStore) /
//! [`ExemptionStore`](aware_interface::ExemptionStore) implementations backed
//! by a single shared SQLite connection.
//!
//! # Example
//!
//! ```rust,ignore
//! use aware_database::{open, SqliteExemptionStore, SqlitePolicyStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = open("main.db")?;
//! let policies = SqlitePolicyStore::from_arc(conn.clone());
//! let exemptions = SqliteExemptionStore::from_arc(conn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod exemption_repository;
mod models;
mod policy_repository;

/// Diesel table definitions.
pub mod schema;

pub use connection::{SharedConnection, establish_connection, open, run_migrations};
pub use exemption_repository::SqliteExemptionStore;
pub use models::{ExemptionRow, PolicyRow};
pub use policy_repository::SqlitePolicyStore;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, aware_error::DatabaseError>;
