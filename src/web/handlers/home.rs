//! Root page handler.

use axum::response::Redirect;

use crate::web::IMPORT_PATH;

/// Sends visitors to the import page, the application's dashboard.
///
/// # Endpoint
///
/// `GET /`
///
/// Unauthenticated visitors continue on to `/login` via the import page's
/// session check.
pub async fn home_handler() -> Redirect {
    Redirect::to(IMPORT_PATH)
}
