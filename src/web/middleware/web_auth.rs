//! Cookie session authentication for page routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::session_token_from_headers;
use crate::domain::entities::User;
use crate::state::AppState;
use crate::web::LOGIN_PATH;
use crate::web::error::WebError;

/// The signed-in user, inserted as a request extension by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticates page requests using the session cookie.
///
/// # Authentication Flow
///
/// 1. Extract the session token from the `Cookie` header
/// 2. Validate it via [`crate::application::services::AuthService::validate_session`]
/// 3. On success, insert [`CurrentUser`] and continue to the handler
/// 4. On a missing, unknown or expired session, redirect to `/login`
///
/// Unlike JSON endpoints, which would answer `401 Unauthorized`, page requests
/// are redirected so the browser lands on the login form.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::web::middleware::web_auth;
///
/// let protected = Router::new()
///     .route("/import", get(import_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
///
/// # Errors
///
/// Renders the error page when the session store cannot be queried.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = session_token_from_headers(req.headers()) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match st.auth_service.validate_session(&token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(e) => WebError(e).into_response(),
    }
}
