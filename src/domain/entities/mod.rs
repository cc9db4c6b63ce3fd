//! Core domain entities.
//!
//! - [`User`] - An account that can sign in
//! - [`Session`] - A signed-in browser session
//! - [`ImportStats`] - Aggregate counts shown on the import page
//! - [`ImportJob`] - A unit of work pushed to the queue service

pub mod import_stats;
pub mod job;
pub mod session;
pub mod user;

pub use import_stats::ImportStats;
pub use job::{ImportJob, QueueName};
pub use session::{NewSession, Session};
pub use user::{NewUser, User};
