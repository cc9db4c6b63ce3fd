//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `FromRow`, so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage
//! - [`PgSessionRepository`] - Session storage keyed by token hash
//! - [`PgImportRepository`] - Import statistics queries

pub mod pg_import_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_import_repository::PgImportRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
