use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webtail::cli::Cli;
use webtail::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.server.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let registry = cli.source_registry()?;
    for source in registry.sources() {
        tracing::info!(source = %source, "registered source");
    }

    webtail::server::run(config, registry).await?;
    Ok(())
}
