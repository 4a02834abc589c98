//! Run database migrations.
//!
//! Both binaries share one database, so there is a single migration set.
//! It lives next to the storefront crate and is embedded here at compile
//! time via `sqlx::migrate!`.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::CommandError;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
