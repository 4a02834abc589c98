//! Authentication route handlers.
//!
//! Handles buyer login, registration, and logout backed by the local
//! user table.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());

    match service.login(&form.username, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username,
            };

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials | AuthError::UserNotFound) => {
            tracing::warn!(username = %form.username, "login failed");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login error: {}", e);
            Redirect::to("/auth/login?error=failed").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    // Validate passwords match
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    let service = AuthService::new(state.pool());

    match service.register(&form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "user registered");
            Redirect::to("/auth/login?success=registered").into_response()
        }
        Err(AuthError::UsernameTaken) => {
            Redirect::to("/auth/register?error=username_taken").into_response()
        }
        Err(AuthError::InvalidUsername(_)) => {
            Redirect::to("/auth/register?error=invalid_username").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/auth/register?error=password_too_short").into_response()
        }
        Err(e) => {
            tracing::error!("Registration error: {}", e);
            Redirect::to("/auth/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session and redirects to the home page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/").into_response()
}
