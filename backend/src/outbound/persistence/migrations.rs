//! Embedded schema migrations applied at start-up.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task panicked: {message}")]
    Task { message: String },
}

/// Apply every pending migration using a blocking connection.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
            message: err.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Run [`run_pending_migrations`] off the async runtime.
pub async fn migrate(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}
