//! Integration tests for warung.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p warung-cli -- migrate
//! cargo run -p warung-cli -- seed
//!
//! # Start both servers
//! cargo run -p warung-storefront &
//! cargo run -p warung-admin &
//!
//! # Run integration tests
//! cargo test -p warung-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they need running
//! servers and a migrated database.

use reqwest::Client;
use reqwest::redirect::Policy;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Client with a cookie store, following redirects.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Client with a cookie store that does NOT follow redirects.
///
/// Needed by tests that assert on `Location` headers, such as the
/// checkout redirect to WhatsApp.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username for account tests.
#[must_use]
pub fn unique_username() -> String {
    format!("it-{}", uuid::Uuid::new_v4().simple())
}
