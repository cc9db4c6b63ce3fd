//! Services the HTTP handlers and the admin CLI call into.
//!
//! - [`services::auth_service::AuthService`] - Login action, sessions and accounts
//! - [`services::import_service::ImportService`] - Import statistics and note uploads

pub mod services;
