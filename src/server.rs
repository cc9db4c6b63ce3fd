//! HTTP server initialization and runtime setup.
//!
//! Handles logging, database connections, queue setup, and the Axum server
//! lifecycle for both binaries.

use crate::application::services::{AuthService, ImportService};
use crate::config::{Config, QueueConfig};
use crate::domain::repositories::{ImportRepository, SessionRepository, UserRepository};
use crate::infrastructure::persistence::{
    PgImportRepository, PgSessionRepository, PgUserRepository,
};
use crate::infrastructure::queue::{JobQueue, NullQueue, RedisQueue};
use crate::queue_service::{self, QueueState};
use crate::routes::app_router;
use crate::state::AppState;
use crate::storage::{FsUploader, ObjectUploader};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Public URL prefix for uploads kept on the local filesystem.
const LOCAL_UPLOADS_URL: &str = "/uploads";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`; `log_format` selects `json` or
/// human-readable text output.
pub fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Connects the PostgreSQL pool using the configured limits.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connects the job queue, falling back to [`NullQueue`] when Redis is not
/// configured or unreachable.
async fn connect_queue(config: &Config) -> Arc<dyn JobQueue> {
    match &config.redis_url {
        Some(redis_url) => match RedisQueue::connect(redis_url).await {
            Ok(queue) => {
                tracing::info!("Job queue enabled (Redis)");
                Arc::new(queue)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullQueue.", e);
                Arc::new(NullQueue::new())
            }
        },
        None => {
            tracing::info!("Job queue disabled (NullQueue)");
            Arc::new(NullQueue::new())
        }
    }
}

/// Builds the application state from a connected pool and queue.
pub fn build_state(config: &Config, pool: PgPool, queue: Arc<dyn JobQueue>) -> AppState {
    let pool = Arc::new(pool);

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let sessions: Arc<dyn SessionRepository> = Arc::new(PgSessionRepository::new(pool.clone()));
    let imports: Arc<dyn ImportRepository> = Arc::new(PgImportRepository::new(pool));

    let public_base_url = config
        .r2
        .as_ref()
        .map(|r2| r2.public_base_url())
        .unwrap_or_else(|| LOCAL_UPLOADS_URL.to_string());
    let uploader: Arc<dyn ObjectUploader> =
        Arc::new(FsUploader::new(&config.upload_dir, public_base_url));

    let auth_service = Arc::new(AuthService::new(
        users,
        sessions,
        config.session_secret.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    ));
    let import_service = Arc::new(ImportService::new(imports, uploader, queue.clone()));

    AppState {
        auth_service,
        import_service,
        queue,
        cookie_secure: config.cookie_secure,
    }
}

/// Runs the web application with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis job queue (or NullQueue fallback)
/// - Expired session cleanup
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let queue = connect_queue(&config).await;
    let state = build_state(&config, pool, queue);

    match state.auth_service.purge_expired_sessions().await {
        Ok(0) => {}
        Ok(n) => tracing::info!(removed = n, "Expired sessions removed"),
        Err(e) => tracing::warn!("Failed to remove expired sessions: {}", e),
    }

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Runs the queue service's diagnostic HTTP endpoint.
///
/// # Errors
///
/// Returns an error if the listen address is invalid or cannot be bound.
pub async fn run_queue(config: QueueConfig) -> Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid QUEUE_LISTEN address: {}", config.listen_addr))?;

    tracing::info!(directory = %config.directory, "Queue service starting");

    let app = queue_service::routes::router(QueueState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Queue service listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
