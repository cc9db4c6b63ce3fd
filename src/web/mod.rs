//! Server-rendered pages of the web application.
//!
//! Pages are Askama templates under `templates/`, composed from the shared UI kit
//! in `templates/components.html` (`Button`, `Input`, `Placeholder`, `Spinner`,
//! `Header`, `NavButton`) and the layout shell in `templates/base.html`.
//!
//! # Modules
//!
//! - [`error`] - Error page rendering for failed page requests
//! - [`forms`] - Form and query-string payloads
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Cookie session authentication
//! - [`routes`] - Page route configuration

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;

/// Where the error page's "Go Home" action leads.
pub const HOME_PATH: &str = "/";

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Landing page after login.
pub const IMPORT_PATH: &str = "/import";
