//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ImportService};
use crate::domain::repositories::{ImportRepository, SessionRepository, UserRepository};
use crate::infrastructure::queue::JobQueue;
use crate::storage::ObjectUploader;

/// Authentication service over type-erased repositories.
pub type DynAuthService = AuthService<dyn UserRepository, dyn SessionRepository>;

/// Import service over type-erased repository, uploader and queue.
pub type DynImportService = ImportService<dyn ImportRepository, dyn ObjectUploader, dyn JobQueue>;

/// State shared by the web application's handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    pub import_service: Arc<DynImportService>,
    pub queue: Arc<dyn JobQueue>,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}
