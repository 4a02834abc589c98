//! Integration tests for buyer accounts.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p warung-storefront)
//!
//! Run with: cargo test -p warung-integration-tests -- --ignored

use reqwest::StatusCode;

use warung_integration_tests::{
    client, manual_redirect_client, storefront_base_url, unique_username,
};

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_register_then_login() {
    let client = manual_redirect_client();
    let base_url = storefront_base_url();
    let username = unique_username();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("password", "hunter2hunter2"),
            ("password_confirm", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("/auth/login"));
    assert!(location.contains("success=registered"));

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[
            ("username", username.as_str()),
            ("password", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to log in");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_register_rejects_duplicate_username() {
    let client = manual_redirect_client();
    let base_url = storefront_base_url();
    let username = unique_username();

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/auth/register"))
            .form(&[
                ("username", username.as_str()),
                ("password", "hunter2hunter2"),
                ("password_confirm", "hunter2hunter2"),
            ])
            .send()
            .await
            .expect("Failed to register");
        assert!(resp.status().is_redirection());
    }

    // The second attempt bounces back with the taken-username notice
    let resp = client
        .get(format!("{base_url}/auth/register?error=username_taken"))
        .send()
        .await
        .expect("Failed to get register page");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("sudah terdaftar"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_register_rejects_password_mismatch() {
    let client = manual_redirect_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("username", unique_username().as_str()),
            ("password", "hunter2hunter2"),
            ("password_confirm", "something-else"),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=password_mismatch"));
}

// ============================================================================
// Login & Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_login_rejects_wrong_password() {
    let client = manual_redirect_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("username", "nobody-here"), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to log in");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=credentials"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_logout_clears_session() {
    let client = client();
    let base_url = storefront_base_url();
    let username = unique_username();

    // Register and log in
    client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("password", "hunter2hunter2"),
            ("password_confirm", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to register");
    client
        .post(format!("{base_url}/auth/login"))
        .form(&[
            ("username", username.as_str()),
            ("password", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to log in");

    // Logged-in home page greets the buyer by name
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&username));

    // After logout the greeting is gone
    client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to log out");

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains(&username));
}
