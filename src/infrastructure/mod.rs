//! Adapters for PostgreSQL and Redis behind the domain and queue traits.
//!
//! - [`persistence`] - `sqlx` repositories for users, sessions and import statistics
//! - [`queue`] - Import job producers: Redis lists, or a no-op when Redis is absent

pub mod persistence;
pub mod queue;
