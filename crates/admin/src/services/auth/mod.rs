//! Admin authentication service.
//!
//! Password login for admins plus self-service password change. A password
//! change always targets the authenticated admin's own row and requires the
//! current password first.

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use warung_core::{AdminId, Username};

use crate::db::AdminUserRepository;
use crate::models::AdminUser;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` for a wrong password or
    /// an unknown username, without distinguishing the two.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AdminAuthError> {
        let username =
            Username::parse(username).map_err(|_| AdminAuthError::InvalidCredentials)?;

        let (admin, password_hash) = self
            .admins
            .get_password_hash(&username)
            .await?
            .ok_or(AdminAuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)
            .map_err(|_| AdminAuthError::InvalidCredentials)?;

        Ok(admin)
    }

    /// Change the authenticated admin's own password.
    ///
    /// Verifies the current password before rehashing. The confirm-match
    /// check happens at the route layer where both fields are available.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::WrongCurrentPassword` if `current` does not
    /// verify, `AdminAuthError::WeakPassword` if `new` is too short.
    pub async fn change_password(
        &self,
        admin_id: AdminId,
        current: &str,
        new: &str,
    ) -> Result<(), AdminAuthError> {
        let stored_hash = self.admins.get_password_hash_by_id(admin_id).await?;

        verify_password(current, &stored_hash)
            .map_err(|_| AdminAuthError::WrongCurrentPassword)?;

        if new.len() < MIN_PASSWORD_LENGTH {
            return Err(AdminAuthError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let new_hash = hash_password(new)?;
        self.admins.update_password(admin_id, &new_hash).await?;

        Ok(())
    }
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}
