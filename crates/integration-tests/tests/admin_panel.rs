//! Integration tests for the admin panel.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p warung-admin)
//! - An admin account matching `ADMIN_TEST_USERNAME` / `ADMIN_TEST_PASSWORD`
//!   (create one with: cargo run -p warung-cli -- admin create -u ... -p ...)
//!
//! Run with: cargo test -p warung-integration-tests -- --ignored

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use warung_integration_tests::{admin_base_url, client, manual_redirect_client};

fn test_credentials() -> (String, String) {
    let username =
        std::env::var("ADMIN_TEST_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password =
        std::env::var("ADMIN_TEST_PASSWORD").unwrap_or_else(|_| "admin-password".to_string());
    (username, password)
}

/// Test helper: log the client in as the test admin.
async fn login_admin(client: &Client) {
    let base_url = admin_base_url();
    let (username, password) = test_credentials();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("username", username.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in admin");
    assert!(resp.status().is_success() || resp.status().is_redirection());
}

/// A tiny valid-enough payload to stand in for a product photo.
fn fake_image_part() -> Part {
    Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        .file_name("integration-test.jpg")
        .mime_str("image/jpeg")
        .expect("Failed to build image part")
}

// ============================================================================
// Auth Gate Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_dashboard_requires_login() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("/auth/login"));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_admin_login_rejects_bad_credentials() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("username", "admin"), ("password", "definitely-wrong")])
        .send()
        .await
        .expect("Failed to attempt login");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=credentials"));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Product CRUD Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server, database and test admin account"]
async fn test_product_create_edit_delete() {
    let client = client();
    let base_url = admin_base_url();
    login_admin(&client).await;

    // Create
    let form = Form::new()
        .text("name", "Kemeja Integration")
        .text("price", "75000")
        .text("size[]", "S")
        .text("stock[]", "4")
        .text("size[]", "M")
        .text("stock[]", "2")
        .part("image", fake_image_part());

    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create product");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // The dashboard lists the new product
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Kemeja Integration"));

    // Find its edit link to recover the id
    let id = body
        .split("/products/")
        .filter_map(|chunk| chunk.split('/').next())
        .filter_map(|raw| raw.parse::<i32>().ok())
        .max()
        .expect("No product id found on dashboard");

    // Update without a new photo keeps the existing image
    let form = Form::new()
        .text("name", "Kemeja Integration v2")
        .text("price", "80000")
        .text("size[]", "S")
        .text("stock[]", "1");

    let resp = client
        .post(format!("{base_url}/products/{id}"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to update product");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Kemeja Integration v2"));
    assert!(body.contains("Rp 80,000"));

    // Delete
    let resp = client
        .post(format!("{base_url}/products/{id}/delete"))
        .send()
        .await
        .expect("Failed to delete product");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard");
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("Kemeja Integration v2"));
}

#[tokio::test]
#[ignore = "Requires running admin server, database and test admin account"]
async fn test_product_create_requires_image() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();
    login_admin(&client).await;

    let form = Form::new()
        .text("name", "Tanpa Foto")
        .text("price", "10000")
        .text("size[]", "S")
        .text("stock[]", "1");

    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to submit product form");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=missing_image"));
}

#[tokio::test]
#[ignore = "Requires running admin server, database and test admin account"]
async fn test_unknown_product_is_404() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();
    login_admin(&client).await;

    // Edit form
    let resp = client
        .get(format!("{base_url}/products/999999/edit"))
        .send()
        .await
        .expect("Failed to get edit form");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Update
    let form = Form::new()
        .text("name", "Hantu")
        .text("price", "10000")
        .text("size[]", "S")
        .text("stock[]", "1");

    let resp = client
        .post(format!("{base_url}/products/999999"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to submit product form");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Delete
    let resp = client
        .post(format!("{base_url}/products/999999/delete"))
        .send()
        .await
        .expect("Failed to submit delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Password Change Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server, database and test admin account"]
async fn test_password_change_rejects_wrong_current() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();
    login_admin(&client).await;

    let resp = client
        .post(format!("{base_url}/settings/password"))
        .form(&[
            ("current_password", "definitely-wrong"),
            ("new_password", "a-new-password"),
            ("confirm_password", "a-new-password"),
        ])
        .send()
        .await
        .expect("Failed to submit password form");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=wrong_current"));
}

#[tokio::test]
#[ignore = "Requires running admin server, database and test admin account"]
async fn test_password_change_rejects_mismatch() {
    let client = manual_redirect_client();
    let base_url = admin_base_url();
    let (_, password) = test_credentials();
    login_admin(&client).await;

    let resp = client
        .post(format!("{base_url}/settings/password"))
        .form(&[
            ("current_password", password.as_str()),
            ("new_password", "a-new-password"),
            ("confirm_password", "a-different-password"),
        ])
        .send()
        .await
        .expect("Failed to submit password form");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=password_mismatch"));
}
