//! Upload action for HTML note exports.

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use serde_json::json;

use crate::application::services::UploadedFile;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::IMPORT_PATH;
use crate::web::error::WebError;

/// Multipart field carrying the note files.
const FILES_FIELD: &str = "files";

/// Stores uploaded note exports and queues them for import.
///
/// # Endpoint
///
/// `POST /import/upload` (multipart, one or more `files` fields)
///
/// # Response Codes
///
/// - **303 See Other**: Files queued; redirects to `/import?queued=<n>`, adding
///   `&failed=<m>` when only part of the batch reached the queue
/// - **400 Bad Request**: Malformed body, no files, or a file that is not HTML
/// - **500 Internal Server Error**: Storage or queue failure
///
/// Browsers submit an empty `files` part when nothing was chosen; parts without
/// a file name and content are skipped.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, WebError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request("Invalid upload", json!({ "reason": e.body_text() })))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            AppError::bad_request("Invalid upload", json!({ "reason": e.body_text() }))
        })?;

        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }

        files.push(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let outcome = state.import_service.import_files(files).await?;

    let location = if outcome.failed.is_empty() {
        format!("{}?queued={}", IMPORT_PATH, outcome.queued.len())
    } else {
        format!(
            "{}?queued={}&failed={}",
            IMPORT_PATH,
            outcome.queued.len(),
            outcome.failed.len()
        )
    };

    Ok(Redirect::to(&location))
}
