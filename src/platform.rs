//! Capabilities afkd consumes from the chat platform.
//!
//! The bridge session implements these over the wire; tests use the
//! in-memory [`fake::FakePlatform`].

use crate::error::PlatformError;
use afk_proto::{MessageDescriptor, MessageId, Notice, RoomId};
use async_trait::async_trait;

/// Message deletion, the only capability the purge router needs.
#[async_trait]
pub trait Deleter: Send + Sync {
    /// Delete a single message. Deleting an already deleted message succeeds.
    async fn delete_one(&self, room: &RoomId, message: &MessageId) -> Result<(), PlatformError>;

    /// Delete at least two messages younger than the bulk window in one call.
    async fn delete_many(
        &self,
        room: &RoomId,
        messages: &[MessageId],
    ) -> Result<(), PlatformError>;
}

/// Everything the handlers need from the platform.
#[async_trait]
pub trait Platform: Deleter {
    /// Fetch up to `limit` most recent messages of `room`, newest first.
    async fn fetch_recent(
        &self,
        room: &RoomId,
        limit: usize,
    ) -> Result<Vec<MessageDescriptor>, PlatformError>;

    /// Post a notice.
    async fn send(&self, notice: Notice) -> Result<(), PlatformError>;
}
