//! Admin settings routes.
//!
//! Currently just self-service password change. The change always applies
//! to the admin who owns the session.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/settings/password",
        get(password_page).post(change_password),
    )
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Password change page template.
#[derive(Template)]
#[template(path = "settings/password.html")]
pub struct PasswordTemplate {
    pub admin_username: String,
    pub error_message: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the password change form.
///
/// GET /settings/password
async fn password_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    let error_message = query.error.map(|e| match e.as_str() {
        "wrong_current" => "Kata sandi saat ini salah.".to_owned(),
        "password_mismatch" => "Konfirmasi kata sandi tidak cocok.".to_owned(),
        "password_too_short" => "Kata sandi baru minimal 8 karakter.".to_owned(),
        _ => "Gagal mengganti kata sandi, silakan coba lagi.".to_owned(),
    });

    let template = PasswordTemplate {
        admin_username: admin.username.to_string(),
        error_message,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response()
}

/// Change the authenticated admin's password.
///
/// POST /settings/password
#[instrument(skip(state, form))]
async fn change_password(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Form(form): Form<PasswordForm>,
) -> Result<Response> {
    if form.new_password != form.confirm_password {
        return Ok(Redirect::to("/settings/password?error=password_mismatch").into_response());
    }

    let service = AdminAuthService::new(state.pool());
    match service
        .change_password(admin.id, &form.current_password, &form.new_password)
        .await
    {
        Ok(()) => {
            tracing::info!(admin = %admin.username, "admin password changed");
            Ok(Redirect::to("/?success=password_changed").into_response())
        }
        Err(AdminAuthError::WrongCurrentPassword) => {
            Ok(Redirect::to("/settings/password?error=wrong_current").into_response())
        }
        Err(AdminAuthError::WeakPassword(_)) => {
            Ok(Redirect::to("/settings/password?error=password_too_short").into_response())
        }
        Err(e) => Err(e.into()),
    }
}
