//! Main entry point for covidash.

use anyhow::Context;
use clap::Parser;
use covidash::{Cli, Dashboard, JsonFileProvider};
use covidash_charts::PlottersRenderer;
use covidash_common::init_logging;
use covidash_config::ConfigLoader;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_to(&mut config);
    config.validate().context("validating configuration")?;

    let _guard = init_logging(&config.logging).context("initializing logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting covidash");

    let provider = Arc::new(JsonFileProvider::new(&config.data.path));
    let renderer = Arc::new(PlottersRenderer::new(&config.charts));
    let dashboard = Dashboard::new(&config, provider, renderer);

    let summary = dashboard.run(&cli.widget_input()).await?;
    for issue in &summary.issues {
        eprintln!("warning: {issue}");
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
