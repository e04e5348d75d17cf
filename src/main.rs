use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use wc_finals::config::DashboardConfig;
use wc_finals::finals_fetch::load_finals;
use wc_finals::server;

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let config = DashboardConfig::from_env()?;
    configure_logging();

    // The blocking fetch runs before any async runtime exists.
    let data = match load_finals(&config) {
        Ok(data) => data,
        Err(err) => {
            error!("failed to load finals: {err:#}");
            return Err(err);
        }
    };
    info!(source = %config.source_url, "finals loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(server::serve(config.bind_addr, Arc::new(data)))
}
