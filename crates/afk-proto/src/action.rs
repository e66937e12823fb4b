//! Actions afkd asks a bridge to perform.

use crate::error::Result;
use crate::ids::{MessageId, RoomId, UserId};
use serde::{Deserialize, Serialize};

/// One line sent to a bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Post (or replace) a notice. Fire and forget.
    Notice(Notice),
    /// Perform a platform operation and answer with a response line.
    Request(BridgeRequest),
}

impl Outbound {
    /// Encode as a single protocol line (no trailing newline).
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a single protocol line.
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(crate::ProtocolError::EmptyLine);
        }
        Ok(serde_json::from_str(line)?)
    }
}

/// A short message posted by the bot.
///
/// Rendering (embeds, colours, avatars) is up to the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Target room; `None` answers in the direct conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomId>,
    /// User to ping alongside the notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<UserId>,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Main text.
    pub body: String,
    /// Delete the notice after this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_after_ms: Option<u64>,
    /// Edit this earlier message instead of posting a new one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces: Option<MessageId>,
    /// Attach global/room choice buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<ScopePrompt>,
}

impl Notice {
    /// A plain notice in `room`.
    pub fn new(room: Option<RoomId>, body: impl Into<String>) -> Self {
        Self {
            room,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Set the heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Ping `user` with the notice.
    pub fn mentioning(mut self, user: UserId) -> Self {
        self.mention = Some(user);
        self
    }

    /// Ask the bridge to delete the notice after `ms` milliseconds.
    pub fn expiring_after_ms(mut self, ms: u64) -> Self {
        self.expires_after_ms = Some(ms);
        self
    }

    /// Replace an earlier message instead of posting.
    pub fn replacing(mut self, message: Option<MessageId>) -> Self {
        self.replaces = message;
        self
    }

    /// Attach scope choices.
    pub fn with_prompt(mut self, prompt: ScopePrompt) -> Self {
        self.prompt = Some(prompt);
        self
    }
}

/// Asks the bridge to render "Global AFK" and "Server AFK" choices.
///
/// The bridge echoes `reason` back in [`crate::ScopeChosen`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePrompt {
    /// Reason typed with the command, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A platform operation awaiting a [`crate::BridgeResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// Correlation id, unique per bridge session.
    pub request_id: u64,
    /// What to do.
    pub action: RequestAction,
}

/// Platform operations afkd can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestAction {
    /// Fetch up to `limit` most recent messages, newest first.
    FetchRecent {
        /// Room to read.
        room: RoomId,
        /// Maximum number of messages.
        limit: usize,
    },
    /// Delete one message.
    DeleteOne {
        /// Room holding the message.
        room: RoomId,
        /// Message to delete.
        message: MessageId,
    },
    /// Delete several messages with the platform's bulk primitive.
    DeleteMany {
        /// Room holding the messages.
        room: RoomId,
        /// Messages to delete.
        messages: Vec<MessageId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_notice_fields_are_omitted() {
        let line = Outbound::Notice(Notice::new(None, "hi")).to_line().unwrap();
        assert_eq!(line, r#"{"type":"notice","body":"hi"}"#);
    }
}
