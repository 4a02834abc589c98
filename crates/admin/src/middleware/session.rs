//! Session middleware configuration for the admin panel.
//!
//! Uses a dedicated session table and cookie name so admin sessions are
//! disjoint from storefront sessions.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::Key};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "warung_admin_session";

/// Session expiry time in seconds (24 hours, shorter than the storefront).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Errors
///
/// Returns an error if the session table name is rejected by the store.
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore, tower_sessions::service::SignedCookie>, String> {
    // The admin_session table must be created via migration
    let store = PostgresStore::new(pool.clone()).with_table_name("admin_session")?;

    let is_secure = config.base_url.starts_with("https://");

    // Secret length is validated at config load, so derive_from cannot panic
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
