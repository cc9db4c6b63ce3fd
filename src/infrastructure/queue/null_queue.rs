//! No-op queue used when Redis is not configured.

use super::service::{JobQueue, QueueResult};
use crate::domain::entities::ImportJob;
use async_trait::async_trait;
use tracing::{debug, warn};

/// A queue that accepts jobs and discards them.
///
/// Used in development without Redis, and as the fallback when the Redis
/// connection fails at startup. Uploaded files are still stored.
pub struct NullQueue;

impl NullQueue {
    pub fn new() -> Self {
        debug!("Using NullQueue (import jobs are not dispatched)");
        Self
    }
}

impl Default for NullQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobQueue for NullQueue {
    async fn enqueue(&self, job: &ImportJob) -> QueueResult<()> {
        warn!(
            queue = %job.queue,
            key = %job.storage_key,
            "Queue disabled, job dropped"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
