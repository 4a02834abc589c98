//! Database access layer for the admin panel.
//!
//! Repositories own no connections; they borrow the shared pool and keep
//! every query runtime-bound.

pub mod admin_users;
pub mod products;

pub use admin_users::AdminUserRepository;
pub use products::AdminProductRepository;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data failed validation on the way out.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Row not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unique constraint violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection fails.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
