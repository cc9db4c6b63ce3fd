//! Logout action.

use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{delete_session_cookie, session_token_from_headers};
use crate::state::AppState;
use crate::web::LOGIN_PATH;
use crate::web::error::WebError;

/// Ends the current session and clears the cookie.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always redirects to `/login` with `303 See Other`; requests without a session
/// only get the cookie cleared.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if let Some(token) = session_token_from_headers(&headers) {
        state.auth_service.logout(&token).await?;
    }

    Ok((
        [(SET_COOKIE, delete_session_cookie(state.cookie_secure))],
        Redirect::to(LOGIN_PATH),
    )
        .into_response())
}
