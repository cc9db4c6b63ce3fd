//! Liveness and dependency probe for the web application.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, Overall};
use crate::state::AppState;

/// Probes the database and the job queue.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Both probes succeeded
/// - **503 Service Unavailable**: At least one probe failed; the body is the same
///
/// The database probe runs the import statistics query, so a healthy report
/// means the import page can render.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.import_service.get_import_stats().await {
        Ok(stats) => CheckStatus::ok(format!("Connected, {} notes", stats.note_count)),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    };

    let queue = if state.queue.health_check().await {
        CheckStatus::ok("Queue reachable")
    } else {
        CheckStatus::error("Queue connection failed")
    };

    let checks = HealthChecks { database, queue };
    let status = checks.overall();

    let code = match status {
        Overall::Healthy => StatusCode::OK,
        Overall::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }),
    )
}
