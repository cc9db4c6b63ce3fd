//! Error page for page routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::storage::sha256_hex;
use crate::web::HOME_PATH;

/// Message shown in place of internal error details.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while loading this page.";

/// Template for the error page.
///
/// Renders `templates/error.html`: the message, the digest when present, and a
/// "Go Home" action.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
    pub digest: Option<String>,
    pub home_path: &'static str,
    pub user_email: Option<String>,
}

/// Short identifier correlating a rendered error page with the server log.
///
/// First 12 hex characters of the SHA-256 of the message.
pub fn error_digest(message: &str) -> String {
    let mut digest = sha256_hex(message.as_bytes());
    digest.truncate(12);
    digest
}

/// An [`AppError`] raised while serving a page.
///
/// Renders the error page with the error's status code. Internal errors show a
/// generic message and a digest; the detail goes to the log under that digest.
#[derive(Debug)]
pub struct WebError(pub AppError);

impl From<AppError> for WebError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.0.status();

        let (message, digest) = if self.0.is_internal() {
            let detail = format!("{}: {}", self.0, self.0.to_error_info().details);
            let digest = error_digest(&detail);
            tracing::error!(digest = %digest, error = %detail, "Page request failed");
            (GENERIC_ERROR_MESSAGE.to_string(), Some(digest))
        } else {
            (self.0.to_string(), None)
        };

        let page = ErrorTemplate {
            message,
            digest,
            home_path: HOME_PATH,
            user_email: None,
        };

        (status, page).into_response()
    }
}
