use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{error, info};

mod artifacts;
mod config;
mod dashboard;
mod data;
mod model;
mod predict;
mod wizard;

use artifacts::Artifacts;
use config::Config;
use dashboard::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:#}", e);
        return Err(e);
    }

    // Model, scaler and lookup tables are read exactly once; any failure here
    // halts startup.
    let artifacts = match Artifacts::load(&config) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to load artifacts: {:#}", e);
            return Err(e);
        }
    };
    let summary = artifacts.summary();
    info!(
        "Ready: {} teams, {} regions, {} maps",
        summary.teams, summary.regions, summary.maps
    );

    let app = dashboard::router(AppState { artifacts }, config.static_dir.as_deref());
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Predictor listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
