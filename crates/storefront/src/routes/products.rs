//! Product route handlers.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use warung_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::auth::OptionalAuth;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Product card data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: String,
    /// Size labels that still have stock, in insertion order.
    pub available_sizes: Vec<String>,
}

/// Per-size availability for the detail page.
#[derive(Clone)]
pub struct SizeView {
    pub size: String,
    pub stock: i32,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: String,
    pub sizes: Vec<SizeView>,
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub username: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub username: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Load every product with its in-stock size labels, in two queries.
pub(crate) async fn build_product_cards(state: &AppState) -> Result<Vec<ProductCardView>> {
    let repo = ProductRepository::new(state.pool());

    let products = repo.list().await?;
    let sizes = repo.list_sizes().await?;

    let mut by_product: HashMap<i32, Vec<String>> = HashMap::new();
    for size in sizes {
        if size.stock > 0 {
            by_product
                .entry(size.product_id.as_i32())
                .or_default()
                .push(size.size);
        }
    }

    Ok(products
        .into_iter()
        .map(|p| ProductCardView {
            id: p.id.as_i32(),
            name: p.name,
            image: p.image,
            price: p.price.formatted(),
            available_sizes: by_product.remove(&p.id.as_i32()).unwrap_or_default(),
        })
        .collect())
}

/// Display the product listing page.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let products = build_product_cards(&state).await?;

    Ok(ProductsIndexTemplate {
        products,
        username: user.map(|u| u.username.to_string()),
    })
}

/// Display the product detail page with per-size availability.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let repo = ProductRepository::new(state.pool());

    let with_sizes = repo
        .get_with_sizes(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    let product = ProductView {
        id: with_sizes.product.id.as_i32(),
        name: with_sizes.product.name,
        image: with_sizes.product.image,
        price: with_sizes.product.price.formatted(),
        sizes: with_sizes
            .sizes
            .into_iter()
            .map(|s| SizeView {
                size: s.size,
                stock: s.stock,
            })
            .collect(),
    };

    Ok(ProductShowTemplate {
        product,
        username: user.map(|u| u.username.to_string()),
    })
}
