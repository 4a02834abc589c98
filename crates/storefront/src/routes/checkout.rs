//! Checkout route handlers.
//!
//! Checkout is a single form: the buyer picks a size and a quantity, stock is
//! reserved atomically, and the response redirects to a WhatsApp chat with the
//! seller pre-filled with the order summary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use warung_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::auth::RequireAuth;
use crate::models::ProductWithSizes;
use crate::routes::products::{ProductView, SizeView};
use crate::services::whatsapp;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Checkout form data.
///
/// `quantity` arrives as a string so a non-numeric value renders a notice
/// instead of failing form extraction.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub size: String,
    pub quantity: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub product: ProductView,
    pub username: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn load_product(state: &AppState, id: i32) -> Result<ProductWithSizes> {
    ProductRepository::new(state.pool())
        .get_with_sizes(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
}

fn product_view(with_sizes: ProductWithSizes) -> ProductView {
    ProductView {
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
    }
}

/// Display the checkout form for a product.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let with_sizes = load_product(&state, id).await?;

    Ok(CheckoutTemplate {
        product: product_view(with_sizes),
        username: Some(user.username.to_string()),
        error: None,
    })
}

/// Handle checkout form submission.
///
/// Stock is reserved with a single conditional decrement, so concurrent
/// checkouts can never oversell a size. On success the buyer is redirected to
/// `wa.me` with the order summary.
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let with_sizes = load_product(&state, id).await?;

    let render_error = |with_sizes: ProductWithSizes, message: &str| {
        CheckoutTemplate {
            product: product_view(with_sizes),
            username: Some(user.username.to_string()),
            error: Some(message.to_owned()),
        }
        .into_response()
    };

    let Ok(quantity) = form.quantity.trim().parse::<i64>() else {
        return Ok(render_error(with_sizes, "Jumlah harus berupa angka."));
    };

    if quantity < 1 {
        return Ok(render_error(with_sizes, "Jumlah minimal 1."));
    }

    let size = form.size.trim();
    if !with_sizes.sizes.iter().any(|s| s.size == size) {
        return Ok(render_error(with_sizes, "Ukuran tidak tersedia."));
    }

    // Quantities above i32 range can never succeed against an i32 stock column
    let reserved = match i32::try_from(quantity) {
        Ok(qty) => {
            ProductRepository::new(state.pool())
                .decrement_stock(with_sizes.product.id, size, qty)
                .await?
        }
        Err(_) => false,
    };

    if !reserved {
        return Ok(render_error(
            with_sizes,
            "Stok tidak mencukupi untuk ukuran yang dipilih.",
        ));
    }

    let total = with_sizes.product.price * quantity;
    let link = whatsapp::order_link(
        &state.config().whatsapp_phone,
        &with_sizes.product.name,
        size,
        quantity,
        total,
    );

    tracing::info!(
        product_id = id,
        size,
        quantity,
        user = %user.username,
        "checkout reserved stock"
    );

    Ok(Redirect::to(&link).into_response())
}
