//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard (catalog overview)
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! POST /auth/logout             - Logout action
//!
//! # Products (require auth)
//! GET  /products/new            - New product form
//! POST /products                - Create product (multipart)
//! GET  /products/:id/edit       - Edit product form
//! POST /products/:id            - Update product (multipart)
//! POST /products/:id/delete     - Delete product
//!
//! # Settings (require auth)
//! GET  /settings/password       - Password change form
//! POST /settings/password       - Change own password
//! ```

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod settings;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .merge(auth::router())
        .merge(products::router())
        .merge(settings::router())
}
