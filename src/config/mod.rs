//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, bot identity and loading
//! - [`listen`]: Bridge listener configuration (BridgeConfig)
//! - [`presence`]: Away-status notices (PresenceConfig)
//! - [`purge`]: Purge notices (PurgeConfig)
//! - [`validation`]: Startup sanity checks

mod listen;
mod presence;
mod purge;
mod types;
mod validation;

pub use listen::BridgeConfig;
pub use types::Config;
