//! Business logic services for the application layer.

pub mod auth_service;
pub mod import_service;

pub use auth_service::{AuthService, LoginError, LoginSession};
pub use import_service::{ImportOutcome, ImportService, UploadedFile};
