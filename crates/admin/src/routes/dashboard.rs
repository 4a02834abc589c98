//! Admin dashboard: catalog overview.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::AdminProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Size row for the dashboard table.
#[derive(Debug, Clone)]
pub struct SizeRowView {
    pub size: String,
    pub stock: i32,
}

/// Product row for the dashboard table.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: String,
    pub sizes: Vec<SizeRowView>,
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_username: String,
    pub products: Vec<ProductRowView>,
    pub success_message: Option<String>,
}

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the dashboard with the full catalog.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(params): Query<DashboardQuery>,
) -> Result<Response> {
    let repo = AdminProductRepository::new(state.pool());
    let catalog = repo.list_with_sizes().await?;

    let products = catalog
        .into_iter()
        .map(|entry| ProductRowView {
            id: entry.product.id.as_i32(),
            name: entry.product.name,
            image: entry.product.image,
            price: entry.product.price.formatted(),
            sizes: entry
                .sizes
                .into_iter()
                .map(|s| SizeRowView {
                    size: s.size,
                    stock: s.stock,
                })
                .collect(),
        })
        .collect();

    let success_message = params.success.map(|s| match s.as_str() {
        "product_created" => "Produk berhasil ditambahkan.".to_owned(),
        "product_updated" => "Produk berhasil diperbarui.".to_owned(),
        "product_deleted" => "Produk berhasil dihapus.".to_owned(),
        "password_changed" => "Kata sandi berhasil diganti.".to_owned(),
        other => other.to_owned(),
    });

    let template = DashboardTemplate {
        admin_username: admin.username.to_string(),
        products,
        success_message,
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response())
}
