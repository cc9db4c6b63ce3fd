//! Job queue producers for handing uploaded notes to the queue service.
//!
//! Provides a [`JobQueue`] trait with two implementations:
//! - [`RedisQueue`] - Pushes JSON jobs onto Redis lists
//! - [`NullQueue`] - Drops jobs when Redis is not configured

mod null_queue;
mod redis_queue;
mod service;

pub use null_queue::NullQueue;
pub use redis_queue::RedisQueue;
pub use service::{JobQueue, QueueError, QueueResult, queue_key};

#[cfg(test)]
pub use service::MockJobQueue;
