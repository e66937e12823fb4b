//! afkd - AFK presence and message purge daemon.
//!
//! Chat platform bridges connect over TCP and stream room events as JSON
//! lines; afkd tracks who is away, answers mentions of away users and
//! performs bulk message purges through the bridge.

mod config;
mod error;
mod handlers;
mod network;
mod platform;
mod purge;
mod state;

use crate::config::Config;
use crate::handlers::Dispatcher;
use crate::network::Gateway;
use crate::state::PresenceRegistry;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "afkd.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        bot = %config.bot.name,
        prefix = %config.bot.command_prefix,
        address = %config.bridge.address,
        "Starting afkd"
    );

    let bridge = config.bridge.clone();
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(PresenceRegistry::new()),
        Arc::new(config),
    ));

    let gateway = Gateway::bind(bridge, dispatcher).await?;

    tokio::select! {
        result = gateway.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown requested");
        }
    }

    Ok(())
}
