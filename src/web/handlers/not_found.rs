//! Fallback handler for unknown paths.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

/// Template for the not-found page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    user_email: Option<String>,
}

/// Renders the not-found placeholder with `404 Not Found`.
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { user_email: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_template_renders_placeholder_and_nav() {
        let html = NotFoundTemplate { user_email: None }.render().unwrap();

        assert!(html.contains("Page not found"));
        assert!(html.contains("class=\"nav-button\" href=\"/\""));
        assert!(html.contains("Log in"));
    }
}
