//! Top-level router configuration for the web application.
//!
//! # Route Structure
//!
//! - `GET  /`              - Redirect to `/import`
//! - `GET  /health`        - Health check: database, queue (public)
//! - `GET  /login`         - Login page (public)
//! - `POST /login`         - Login action (public, strict rate limit)
//! - `POST /logout`        - Logout action (public)
//! - `GET  /import`        - Import page (cookie session required)
//! - `POST /import/upload` - Note upload (cookie session required)
//! - `/static/*`           - Static assets
//! - anything else         - Not-found page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Cookie session on protected pages
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api::handlers::health_handler;
use crate::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use crate::web::middleware::web_auth;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the result must be served with
/// `into_make_service_with_connect_info::<SocketAddr>`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, true))
}

/// Builds the route tree.
///
/// With `rate_limited` set to `false` the router needs no connect info, which is
/// how the integration tests drive it.
pub fn router(state: AppState, rate_limited: bool) -> Router {
    let mut web_protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    );
    let mut web_public = web::routes::public_routes();
    let mut web_login = web::routes::login_routes();

    if rate_limited {
        web_protected = web_protected.layer(rate_limit::layer());
        web_public = web_public.layer(rate_limit::layer());
        web_login = web_login.layer(rate_limit::login_layer());
    }

    Router::new()
        .route("/health", get(health_handler))
        .merge(web_protected)
        .merge(web_public)
        .merge(web_login)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
