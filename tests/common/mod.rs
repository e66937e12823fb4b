//! Integration test common infrastructure.
//!
//! Provides utilities for spawning test daemons, connecting fake bridges,
//! and asserting on the lines afkd sends back.

pub mod bridge;
pub mod server;

#[allow(unused_imports)]
pub use bridge::TestBridge;
#[allow(unused_imports)]
pub use server::TestServer;

use afk_proto::{Author, Inbound, Mention, MessageEvent, MessageId, RoomId, UserId};

/// Build a chat message event.
#[allow(dead_code)]
pub fn message(id: &str, room: &str, author: &str, content: &str) -> MessageEvent {
    MessageEvent {
        id: MessageId::new(id),
        room: Some(RoomId::new(room)),
        author: Author {
            id: UserId::new(author),
            name: author.to_string(),
            bot: false,
        },
        content: content.to_string(),
        mentions: Vec::new(),
        can_manage_messages: false,
    }
}

/// Build a chat message event that mentions `targets`.
#[allow(dead_code)]
pub fn mentioning(id: &str, room: &str, author: &str, content: &str, targets: &[&str]) -> Inbound {
    let mut event = message(id, room, author, content);
    event.mentions = targets
        .iter()
        .map(|target| Mention {
            id: UserId::new(*target),
            name: target.to_string(),
        })
        .collect();
    Inbound::Message(event)
}
