//! Database connection utilities.

use crate::DatabaseResult;
use aware_error::{DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A connection shared between repositories.
pub type SharedConnection = Arc<Mutex<SqliteConnection>>;

/// Establish a connection to the SQLite database at `url`.
///
/// `:memory:` opens a private in-memory database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn establish_connection(url: &str) -> DatabaseResult<SqliteConnection> {
    SqliteConnection::establish(url).map_err(DatabaseError::from)
}

/// Run pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))
}

/// Connects, migrates and wraps the connection for sharing.
///
/// # Errors
///
/// Returns an error if connecting or migrating fails.
#[instrument]
pub fn open(url: &str) -> DatabaseResult<SharedConnection> {
    let mut conn = establish_connection(url)?;
    run_migrations(&mut conn)?;
    debug!("Database ready");
    Ok(Arc::new(Mutex::new(conn)))
}
