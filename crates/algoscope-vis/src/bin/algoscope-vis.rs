//! Algoscope Visualization Server
//!
//! Serve the playback API. Configuration comes from the environment; an
//! optional first argument overrides the port.

use std::env;

use algoscope_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoscope_vis=info,algoscope_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env()?;
    if let Some(port) = env::args().nth(1).and_then(|s| s.parse().ok()) {
        config = config.with_port(port);
    }

    tracing::info!(
        addr = %config.addr,
        seed = ?config.seed,
        speed = config.speed,
        "Starting Algoscope visualizer"
    );

    let server = VisServer::from_config(&config);
    server.serve(config.addr).await?;

    Ok(())
}
