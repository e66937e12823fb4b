//! Events flowing from the platform bridge into afkd.

use crate::error::{ProtocolError, Result};
use crate::ids::{MessageId, RoomId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line received from a bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// A user posted a message somewhere the bot can see.
    Message(MessageEvent),
    /// A user picked an option on a scope prompt.
    ScopeChosen(ScopeChosen),
    /// Completion of an earlier [`crate::BridgeRequest`].
    Response(BridgeResponse),
}

impl Inbound {
    /// Decode a single protocol line.
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }
        Ok(serde_json::from_str(line)?)
    }

    /// Encode as a single protocol line (no trailing newline).
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The author of a message or interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Account identifier.
    pub id: UserId,
    /// Display name, used only in notices.
    pub name: String,
    /// Whether the account is an automated bot.
    #[serde(default)]
    pub bot: bool,
}

/// A user referenced by a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A message posted in a room or direct conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Message identifier.
    pub id: MessageId,
    /// Room the message was posted in; `None` for direct messages.
    #[serde(default)]
    pub room: Option<RoomId>,
    /// Who wrote it.
    pub author: Author,
    /// Raw text content.
    #[serde(default)]
    pub content: String,
    /// Users mentioned in the message, in platform order.
    #[serde(default)]
    pub mentions: Vec<Mention>,
    /// Whether the author may delete other people's messages in this room.
    #[serde(default)]
    pub can_manage_messages: bool,
}

/// A user answered a scope prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChosen {
    /// Who pressed the option.
    pub user: Author,
    /// Room the prompt lives in; `None` for direct messages.
    #[serde(default)]
    pub room: Option<RoomId>,
    /// `true` for the global option, `false` for the room option.
    pub global: bool,
    /// Reason echoed back from the prompt.
    #[serde(default)]
    pub reason: Option<String>,
    /// The prompt message, so the confirmation can replace it.
    #[serde(default)]
    pub prompt: Option<MessageId>,
}

/// Answer to a [`crate::BridgeRequest`], correlated by `request_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    /// Identifier chosen by afkd when the request was sent.
    pub request_id: u64,
    /// Result of the request.
    pub status: ResponseStatus,
}

/// How a bridge request ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The platform accepted the request.
    Ok {
        /// Fetched messages, most recent first. Empty for deletions.
        #[serde(default)]
        messages: Vec<MessageDescriptor>,
    },
    /// The platform rejected the request or the bridge could not reach it.
    Error {
        /// Human readable reason.
        message: String,
    },
}

/// Summary of a recent room message, as returned by a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Message identifier.
    pub id: MessageId,
    /// Author account.
    pub author: UserId,
    /// Whether the author is a bot.
    #[serde(default)]
    pub bot: bool,
    /// Creation time on the platform.
    pub created_at: DateTime<Utc>,
}
