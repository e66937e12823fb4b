//! Gateway - TCP listener that accepts bridge connections.
//!
//! The Gateway binds the configured address and spawns a Session task for
//! each bridge that connects. All sessions share one Dispatcher and therefore
//! one presence registry.

use crate::config::BridgeConfig;
use crate::handlers::Dispatcher;
use crate::network::Session;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts bridge connections and spawns sessions.
pub struct Gateway {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    config: BridgeConfig,
}

impl Gateway {
    /// Bind the gateway to `config.address`.
    pub async fn bind(config: BridgeConfig, dispatcher: Arc<Dispatcher>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.address).await?;
        info!(address = %listener.local_addr()?, "Bridge listener bound");
        Ok(Self {
            listener,
            dispatcher,
            config,
        })
    }

    /// Run the gateway, accepting bridges forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Bridge connection accepted");
                    let session = Session::new(
                        stream,
                        addr,
                        Arc::clone(&self.dispatcher),
                        self.config.clone(),
                    );
                    tokio::spawn(async move {
                        if let Err(e) = session.run().await {
                            error!(%addr, error = %e, "Bridge session error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept bridge connection");
                }
            }
        }
    }
}
