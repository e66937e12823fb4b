//! State management module.
//!
//! Contains the presence registry, the only state afkd keeps between events.

mod presence;

pub use presence::{AwayRecord, PresenceRegistry};
