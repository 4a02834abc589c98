//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::error::Result;
use crate::filters;
use crate::middleware::auth::OptionalAuth;
use crate::routes::products::{ProductCardView, build_product_cards};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub username: Option<String>,
}

/// Display the home page with the full catalog grid.
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let products = build_product_cards(&state).await?;

    Ok(HomeTemplate {
        products,
        username: user.map(|u| u.username.to_string()),
    })
}
