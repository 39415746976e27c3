//! Load Cell Controller Node - Main Entry Point

use anyhow::Context;
use loadcell_node::{build_host, init_logging, LoggingTransport, NodeConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = NodeConfig::load(config_path.as_deref()).context("loading node configuration")?;

    init_logging(&config.logging)?;

    info!("=== {} v{} ===", config.node_name, config.firmware_version);
    info!(
        node_id = config.node_id,
        sensor_id = config.sensor_id,
        "Loaded configuration: {:?}",
        config.host
    );

    let transport = LoggingTransport::new(config.node_id);
    let mut host = build_host(&config, transport)?;

    host.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
        info!("Shutdown requested");
    })
    .await
    .context("driver host halted")?;

    Ok(())
}
