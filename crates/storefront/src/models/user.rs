//! User domain types.

use chrono::{DateTime, Utc};

use warung_core::{UserId, Username};

/// A storefront user (domain type).
///
/// Buyers self-register; nothing in the system updates or deletes them.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
