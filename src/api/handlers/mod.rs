//! Handlers for JSON endpoints.

mod health;

pub use health::health_handler;
