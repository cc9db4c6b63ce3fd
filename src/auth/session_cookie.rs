//! Session cookie helpers.
//!
//! The session cookie carries the raw session token. It is always `HttpOnly`,
//! scoped to `/` and `SameSite=Lax`; `Secure` is added when the deployment
//! terminates TLS.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE_NAME: &str = "peas_session";

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Builds the `Set-Cookie` value that stores `token` until `expires_at`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the token contains bytes that are not valid
/// in a header value.
pub fn set_session_cookie(
    token: &str,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        SESSION_COOKIE_NAME,
        token,
        expires_at.format(COOKIE_DATE_FORMAT)
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::try_from(cookie)
        .map_err(|_| AppError::internal("Invalid session cookie value", json!({})))
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub fn delete_session_cookie(secure: bool) -> HeaderValue {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT{}",
        SESSION_COOKIE_NAME,
        if secure { "; Secure" } else { "" }
    );

    HeaderValue::try_from(cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Extracts the session token from the request `Cookie` header(s).
///
/// Handles several cookies per header and several `Cookie` headers; empty values
/// are treated as absent.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(SESSION_COOKIE_NAME), Some(value)) if !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_set_session_cookie() {
        let expires = Utc.with_ymd_and_hms(2024, 11, 5, 8, 30, 0).unwrap();
        let value = set_session_cookie("tok_123", expires, false).unwrap();

        assert_eq!(
            value.to_str().unwrap(),
            "peas_session=tok_123; Path=/; HttpOnly; SameSite=Lax; Expires=Tue, 05 Nov 2024 08:30:00 GMT"
        );
    }

    #[test]
    fn test_set_session_cookie_secure() {
        let value = set_session_cookie("tok", Utc::now(), true).unwrap();
        assert!(value.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_set_session_cookie_rejects_invalid_bytes() {
        assert!(set_session_cookie("bad\ntoken", Utc::now(), false).is_err());
    }

    #[test]
    fn test_delete_session_cookie() {
        let value = delete_session_cookie(false);
        let value = value.to_str().unwrap();

        assert!(value.starts_with("peas_session=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn test_session_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; peas_session=abc123; other=1"),
        );

        assert_eq!(session_token_from_headers(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("peas_session="));
        assert_eq!(session_token_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("peas_session_old=zzz"));
        assert_eq!(session_token_from_headers(&headers), None);
    }

    #[test]
    fn test_session_token_across_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("peas_session=second"));

        assert_eq!(session_token_from_headers(&headers), Some("second".to_string()));
    }
}
