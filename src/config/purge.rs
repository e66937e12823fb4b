//! Purge notice configuration.
//!
//! Selection limits (100 messages, 14 day bulk window) are platform facts and
//! live in [`crate::purge`], not here.

use serde::Deserialize;

/// Purge notice configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeConfig {
    /// Seconds before purge result notices are removed (default: 3).
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl(),
        }
    }
}

impl PurgeConfig {
    /// Notice lifetime in milliseconds.
    pub fn notice_ttl_ms(&self) -> u64 {
        self.notice_ttl_secs.saturating_mul(1000)
    }
}

fn default_notice_ttl() -> u64 {
    3
}
