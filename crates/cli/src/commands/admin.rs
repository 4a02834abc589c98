//! Admin account management.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use warung_admin::db::{AdminUserRepository, RepositoryError};
use warung_admin::services::auth::hash_password;
use warung_core::Username;

use super::CommandError;

/// Minimum password length, matching the admin panel's own rule.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Create a new admin account.
///
/// # Errors
///
/// Returns `CommandError::UserExists` if the username is taken and
/// `CommandError::InvalidInput` for a bad username or short password.
pub async fn create(username: &str, password: &str) -> Result<(), CommandError> {
    let username = Username::parse(username)
        .map_err(|e| CommandError::InvalidInput(format!("invalid username: {e}")))?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CommandError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let database_url = super::database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let password_hash = hash_password(password)
        .map_err(|e| CommandError::InvalidInput(format!("failed to hash password: {e}")))?;

    let admins = AdminUserRepository::new(&pool);
    let admin = admins
        .create(&username, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::UserExists(username.to_string()),
            other => CommandError::Repository(other),
        })?;

    tracing::info!(
        admin_id = %admin.id,
        username = %admin.username,
        "Admin account created"
    );

    Ok(())
}
