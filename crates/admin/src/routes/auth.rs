//! Admin authentication routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Admin login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the login page.
///
/// GET /auth/login
async fn login_page(Query(query): Query<MessageQuery>) -> Response {
    let error = query.error.map(|e| match e.as_str() {
        "credentials" => "Nama pengguna atau kata sandi salah.".to_owned(),
        "login_required" => "Silakan masuk terlebih dahulu.".to_owned(),
        "session" => "Terjadi masalah sesi, silakan coba lagi.".to_owned(),
        _ => "Gagal masuk, silakan coba lagi.".to_owned(),
    });

    let template = LoginTemplate { error };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response()
}

/// Handle login form submission.
///
/// POST /auth/login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AdminAuthService::new(state.pool());

    match service.login(&form.username, &form.password).await {
        Ok(admin) => {
            let current_admin = CurrentAdmin {
                id: admin.id,
                username: admin.username,
            };

            if let Err(e) = set_current_admin(&session, &current_admin).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(AdminAuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "admin login failed");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Admin login error: {}", e);
            Redirect::to("/auth/login?error=failed").into_response()
        }
    }
}

/// Handle logout.
///
/// POST /auth/logout
async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/auth/login").into_response()
}
