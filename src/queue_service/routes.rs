//! Queue service route configuration.

use axum::{Router, routing::get};

use crate::middleware::tracing;
use crate::queue_service::{QueueState, health::health_handler};

/// Builds the queue service router.
///
/// # Endpoints
///
/// - `GET /` - Diagnostic report
pub fn router(state: QueueState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueueConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn state() -> QueueState {
        QueueState::new(QueueConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            redis_host: None,
            redis_port: None,
            directory: "does-not-exist".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        })
    }

    #[tokio::test]
    async fn test_root_is_served() {
        let response = router(state())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_other_paths_are_not_found() {
        let response = router(state())
            .oneshot(Request::get("/queues").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
