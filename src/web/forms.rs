//! Form and query-string payloads for page routes.

use serde::{Deserialize, Serialize};

/// Fields submitted by the login form.
///
/// Missing fields deserialize as empty strings so the login action can report
/// them instead of the extractor rejecting the request.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /login?error=<code>`
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// `GET /import?queued=<n>&failed=<m>`
#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    pub queued: Option<usize>,
    pub failed: Option<usize>,
}
