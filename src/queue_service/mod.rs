//! Queue service HTTP surface.
//!
//! The queue service runs as its own process (`peas-queue`). Its HTTP surface is a
//! single diagnostic endpoint reporting the queues it serves, the Redis target it
//! was configured with, and the contents of its working directory.
//!
//! # Modules
//!
//! - [`health`] - Diagnostic handler and response DTOs
//! - [`routes`] - Router construction

pub mod health;
pub mod routes;

use std::sync::Arc;

use crate::config::QueueConfig;

/// State shared by the queue service's handlers.
#[derive(Clone)]
pub struct QueueState {
    pub config: Arc<QueueConfig>,
}

impl QueueState {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
