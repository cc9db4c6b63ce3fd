//! Queue service entry point.
//!
//! Serves the diagnostic endpoint on `QUEUE_LISTEN` (default `0.0.0.0:4200`).

use peas::config::QueueConfig;
use peas::server::{init_tracing, run_queue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = QueueConfig::from_env();
    init_tracing(&config.log_level, &config.log_format);

    run_queue(config).await
}
