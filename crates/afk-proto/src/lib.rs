//! # afk-proto
//!
//! Wire types spoken between `afkd` and a chat platform bridge, plus the
//! command grammar users type into rooms.
//!
//! ## Features
//!
//! - Newline-delimited JSON events from the bridge ([`Inbound`])
//! - Notices and capability requests sent back to the bridge ([`Outbound`])
//! - Strongly typed identifiers for users, rooms and messages
//! - Parsing of `afk`, `afkstatus`, `help` and `purge` commands
//!
//! ## Quick Start
//!
//! ```rust
//! use afk_proto::{BotCommand, Inbound};
//!
//! let line = r#"{"type":"message","id":"9","room":"r1","author":{"id":"u1","name":"ann"},"content":"?afk lunch"}"#;
//! let Inbound::Message(event) = Inbound::from_line(line).unwrap() else {
//!     panic!("expected a message");
//! };
//!
//! let cmd = BotCommand::parse(&event.content, "?", &event.mentions);
//! assert_eq!(cmd, Some(BotCommand::Afk { reason: Some("lunch") }));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod command;
pub mod error;
pub mod event;
pub mod ids;

pub use self::action::{BridgeRequest, Notice, Outbound, RequestAction, ScopePrompt};
pub use self::command::{BotCommand, PurgeArgs, PurgeFilter, PURGE_ALL};
pub use self::error::{ProtocolError, Result};
pub use self::event::{
    Author, BridgeResponse, Inbound, Mention, MessageDescriptor, MessageEvent, ResponseStatus,
    ScopeChosen,
};
pub use self::ids::{MessageId, RoomId, UserId};
