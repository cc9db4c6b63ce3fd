//! Per-client rate limiting for page routes.
//!
//! Buckets are keyed by the socket peer address, so the server must be started
//! with connect info. Rejected requests get `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Token bucket refilled by one token every `period`, holding at most `burst`.
fn bucket(period: Duration, burst: u32) -> RateLimitLayer {
    let config = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .finish()
        .expect("period and burst are non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Page navigation: 2 requests per second, bursts of 100.
pub fn layer() -> RateLimitLayer {
    bucket(Duration::from_millis(500), 100)
}

/// `POST /login`: one attempt every 2 seconds, bursts of 10.
pub fn login_layer() -> RateLimitLayer {
    bucket(Duration::from_secs(2), 10)
}
