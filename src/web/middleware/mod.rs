//! Middleware for page routes.

pub mod web_auth;

pub use web_auth::CurrentUser;
