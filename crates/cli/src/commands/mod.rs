//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] warung_admin::db::RepositoryError),

    /// Admin account already exists.
    #[error("Admin '{0}' already exists")]
    UserExists(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Resolve the shared database URL from the environment.
///
/// Accepts `DATABASE_URL` or either binary-specific variable, since all
/// three point at the same store database.
pub(crate) fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    for key in ["DATABASE_URL", "ADMIN_DATABASE_URL", "STOREFRONT_DATABASE_URL"] {
        if let Ok(value) = std::env::var(key) {
            return Ok(SecretString::from(value));
        }
    }

    Err(CommandError::MissingEnvVar("DATABASE_URL"))
}
