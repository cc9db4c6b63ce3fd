//! Redis-backed job queue.

use super::service::{JobQueue, QueueError, QueueResult, queue_key};
use crate::config::mask_connection_string;
use crate::domain::entities::ImportJob;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, info, warn};

/// Attempts after the first failed push.
const ENQUEUE_RETRIES: usize = 3;

/// Redis job queue.
///
/// Jobs are serialized to JSON and `LPUSH`ed onto `peas:queue:<name>`; the queue
/// service consumes from the other end. Uses `ConnectionManager` for automatic
/// reconnects.
pub struct RedisQueue {
    client: ConnectionManager,
}

impl RedisQueue {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ConnectionError`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> QueueResult<Self> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            QueueError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            QueueError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| QueueError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl JobQueue for RedisQueue {
    async fn enqueue(&self, job: &ImportJob) -> QueueResult<()> {
        let key = queue_key(job.queue);
        let payload = serde_json::to_string(job)?;

        let strategy = ExponentialBackoff::from_millis(50)
            .map(jitter)
            .take(ENQUEUE_RETRIES);

        let push = || {
            let mut conn = self.client.clone();
            let key = key.clone();
            let payload = payload.clone();
            async move {
                conn.lpush::<_, _, i64>(&key, payload).await.inspect_err(|e| {
                    warn!("Redis LPUSH to {} failed: {}", key, e);
                })
            }
        };

        let depth = Retry::start(strategy, push)
            .await
            .map_err(|e| QueueError::OperationError(e.to_string()))?;

        debug!(queue = %job.queue, depth, key = %job.storage_key, "Job enqueued");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
