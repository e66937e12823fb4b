//! Network module.
//!
//! Contains the Gateway (TCP listener), the per-bridge Session and the
//! BridgeLink that exposes a session as a platform.

mod gateway;
mod link;
mod session;

pub use gateway::Gateway;
pub use link::BridgeLink;
pub use session::Session;
