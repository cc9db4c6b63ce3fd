//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; PostgreSQL implementations
//! live in `crate::infrastructure::persistence`, and `mockall` generates mocks
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account lookup and creation
//! - [`SessionRepository`] - Session storage keyed by token hash
//! - [`ImportRepository`] - Import statistics

pub mod import_repository;
pub mod session_repository;
pub mod user_repository;

pub use import_repository::ImportRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use import_repository::MockImportRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
