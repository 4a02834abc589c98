//! Business logic services for the admin panel.

pub mod auth;
pub mod uploads;

pub use auth::{AdminAuthError, AdminAuthService};
