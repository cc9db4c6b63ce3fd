//! Import page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::IntoResponse,
};

use crate::application::services::import_service::MAX_NOTE_FILE_BYTES;
use crate::domain::entities::ImportStats;
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::forms::ImportQuery;
use crate::web::middleware::CurrentUser;

/// Template for the import page.
///
/// Renders `templates/import.html` with:
/// - Note, ingredient and parsing error counts
/// - Upload form for HTML note exports
/// - Confirmation after a successful upload
#[derive(Template, WebTemplate)]
#[template(path = "import.html")]
struct ImportTemplate {
    stats: ImportStats,
    queued: Option<usize>,
    failed: Option<usize>,
    max_file_mib: usize,
    user_email: Option<String>,
}

/// Renders the import page.
///
/// # Endpoint
///
/// `GET /import?queued=<n>&failed=<m>`
///
/// # Authentication
///
/// Requires a session; see [`crate::web::middleware::web_auth`].
///
/// Statistics are loaded on every request and the response is marked
/// `Cache-Control: no-store`.
pub async fn import_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<ImportQuery>,
) -> Result<impl IntoResponse, WebError> {
    let stats = state.import_service.get_import_stats().await?;

    let page = ImportTemplate {
        stats,
        queued: query.queued.filter(|n| *n > 0),
        failed: query.failed.filter(|n| *n > 0),
        max_file_mib: MAX_NOTE_FILE_BYTES / (1024 * 1024),
        user_email: Some(user.email),
    };

    Ok(([(CACHE_CONTROL, "no-store")], page))
}
