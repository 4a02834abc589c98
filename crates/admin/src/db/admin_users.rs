//! Admin account repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use warung_core::{AdminId, Username};

use super::RepositoryError;
use crate::models::AdminUser;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid admin username in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            username,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminWithHashRow {
    id: i32,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin account operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin together with their password hash, by username.
    ///
    /// Returns `None` if no such admin exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithHashRow>(
            "SELECT id, username, password_hash, created_at FROM store.admin \
             WHERE username = $1",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let admin = AdminRow {
            id: r.id,
            username: r.username,
            created_at: r.created_at,
        }
        .try_into()?;

        Ok(Some((admin, r.password_hash)))
    }

    /// Get the password hash for an admin by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    pub async fn get_password_hash_by_id(&self, id: AdminId) -> Result<String, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM store.admin WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(|(hash,)| hash)
            .ok_or_else(|| RepositoryError::NotFound(format!("admin {id} not found")))
    }

    /// Replace the password hash for the given admin.
    ///
    /// Only the identified admin's row changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    pub async fn update_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE store.admin SET password_hash = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(password_hash)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("admin {id} not found")));
        }

        Ok(())
    }

    /// Create a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "INSERT INTO store.admin (username, password_hash) VALUES ($1, $2) \
             RETURNING id, username, created_at",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("admin username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }
}
