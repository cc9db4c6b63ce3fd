//! Job queue trait and error types.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::domain::entities::{ImportJob, QueueName};
use crate::error::AppError;

/// Errors that can occur while enqueueing jobs.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue connection error: {0}")]
    ConnectionError(String),
    #[error("Queue operation error: {0}")]
    OperationError(String),
    #[error("Job serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

impl From<QueueError> for AppError {
    fn from(e: QueueError) -> Self {
        tracing::error!("{}", e);
        AppError::internal("Failed to enqueue import job", json!({}))
    }
}

/// Redis list key for a queue.
pub fn queue_key(queue: QueueName) -> String {
    format!("peas:queue:{}", queue)
}

/// Trait for handing jobs to the queue service.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::RedisQueue`] - Redis lists
/// - [`crate::infrastructure::queue::NullQueue`] - No-op when Redis is disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Pushes a job onto the queue named by `job.queue`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError`] when the job cannot be serialized or the backend
    /// rejects it after retries.
    async fn enqueue(&self, job: &ImportJob) -> QueueResult<()>;

    /// Checks if the queue backend is reachable.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_key() {
        assert_eq!(queue_key(QueueName::HtmlNote), "peas:queue:html-note");
        assert_eq!(queue_key(QueueName::Parser), "peas:queue:parser");
    }
}
