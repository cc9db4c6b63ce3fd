//! Login page and login action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::LoginError;
use crate::auth::set_session_cookie;
use crate::state::AppState;
use crate::web::IMPORT_PATH;
use crate::web::error::WebError;
use crate::web::forms::{LoginForm, LoginQuery};

/// Error code issued when a signup code is rejected.
pub const INVALID_SIGNUP_CODE: &str = "invalid-signup-code";

const INVALID_SIGNUP_CODE_MESSAGE: &str =
    "That signup code isn't valid. Check the code you were given and try again.";

/// Template for the login page.
///
/// Renders `templates/login.html` with the email and password inputs, the
/// submitted email preserved, and the error line when set.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    email: String,
    error: Option<String>,
    user_email: Option<String>,
}

impl LoginTemplate {
    fn new(email: String, error: Option<&str>) -> Self {
        Self {
            email,
            error: error.map(describe_login_error),
            user_email: None,
        }
    }
}

/// Text shown for a login error.
///
/// [`INVALID_SIGNUP_CODE`] maps to a fixed message; anything else is shown verbatim.
pub fn describe_login_error(error: &str) -> String {
    if error == INVALID_SIGNUP_CODE {
        INVALID_SIGNUP_CODE_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login?error=<code>`
///
/// The optional `error` query parameter is displayed through
/// [`describe_login_error`].
pub async fn login_handler(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let error = query.error.filter(|e| !e.is_empty());
    LoginTemplate::new(String::new(), error.as_deref())
}

/// Runs the login action.
///
/// # Endpoint
///
/// `POST /login` (form: `email`, `password`)
///
/// # Response Codes
///
/// - **303 See Other**: Signed in; sets the session cookie and redirects to `/import`
/// - **200 OK**: Validation or credential failure; the form is shown with the error
/// - **500 Internal Server Error**: Session store failure; the form is shown with a
///   generic error
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match state.auth_service.login(&form.email, &form.password).await {
        Ok(session) => {
            let cookie =
                set_session_cookie(&session.token, session.expires_at, state.cookie_secure)?;
            tracing::info!(user_id = session.user.id, "User signed in");
            Ok(([(SET_COOKIE, cookie)], Redirect::to(IMPORT_PATH)).into_response())
        }
        Err(LoginError::Internal(e)) => {
            tracing::error!(error = %e, "Login failed");
            let message = LoginError::Internal(e).to_string();
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginTemplate::new(form.email, Some(&message)),
            )
                .into_response())
        }
        Err(e) => {
            tracing::debug!(reason = %e, "Login refused");
            Ok(LoginTemplate::new(form.email, Some(&e.to_string())).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_login_error_maps_signup_code() {
        assert_eq!(
            describe_login_error("invalid-signup-code"),
            INVALID_SIGNUP_CODE_MESSAGE
        );
    }

    #[test]
    fn test_describe_login_error_passes_through() {
        assert_eq!(
            describe_login_error("Invalid email or password."),
            "Invalid email or password."
        );
        assert_eq!(describe_login_error("some-other-code"), "some-other-code");
    }

    #[test]
    fn test_login_template_renders_fields_and_error() {
        let html = LoginTemplate::new("cook@peas.test".to_string(), Some("invalid-signup-code"))
            .render()
            .unwrap();

        assert!(html.contains("name=\"email\""));
        assert!(html.contains("name=\"password\""));
        assert!(html.contains("value=\"cook@peas.test\""));
        assert!(html.contains("signup code"));
    }
}
