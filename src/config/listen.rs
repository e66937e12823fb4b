//! Bridge listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// Bridge listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Address to bind to (e.g., "127.0.0.1:7400").
    pub address: SocketAddr,
    /// Seconds to wait for a bridge to answer a request (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum accepted line length in bytes (default: 65536).
    /// A fetch of 100 message descriptors fits comfortably.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Outbound queue capacity per bridge session (default: 256).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl BridgeConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_line_length() -> usize {
    64 * 1024
}

fn default_outbound_queue() -> usize {
    256
}
