//! Admin account type.

use chrono::{DateTime, Utc};

use warung_core::{AdminId, Username};

/// An administrator account.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}
