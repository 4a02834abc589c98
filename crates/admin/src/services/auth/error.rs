//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Invalid credentials (wrong password or unknown admin).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Current password did not verify during a password change.
    #[error("current password is incorrect")]
    WrongCurrentPassword,

    /// New password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
