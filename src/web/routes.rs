//! Page route configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::handlers::{
    home_handler, import_handler, login_handler, login_submit_handler, logout_handler,
    upload_handler,
};

/// Largest accepted upload request (several note files per submission).
pub const MAX_UPLOAD_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Page routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`], which redirects to `/login`.
///
/// # Endpoints
///
/// - `GET /import` - Import statistics and upload form
/// - `POST /import/upload` - Upload HTML note exports
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/import", get(import_handler))
        .route(
            "/import/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
}

/// Page routes without authentication.
///
/// # Endpoints
///
/// - `GET /` - Redirect to the import page
/// - `GET /login` - Login page
/// - `POST /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/login", get(login_handler))
        .route("/logout", post(logout_handler))
}

/// The login action, kept apart so the caller can rate limit it.
///
/// # Endpoints
///
/// - `POST /login` - Sign in
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_submit_handler))
}
