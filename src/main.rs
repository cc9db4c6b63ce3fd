use peas::config::load_from_env;
use peas::server::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_from_env()?;
    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    run(config).await
}
