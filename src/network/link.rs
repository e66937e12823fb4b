//! Platform capabilities over a bridge session.
//!
//! Requests are tagged with a per-session id and parked until the reader loop
//! hands back the matching response line.

use crate::error::PlatformError;
use crate::platform::{Deleter, Platform};
use afk_proto::{
    BridgeRequest, BridgeResponse, MessageDescriptor, MessageId, Notice, Outbound, RequestAction,
    ResponseStatus, RoomId,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// The afkd end of one bridge connection.
pub struct BridgeLink {
    outbound: mpsc::Sender<Outbound>,
    pending: DashMap<u64, oneshot::Sender<ResponseStatus>>,
    next_id: AtomicU64,
    timeout: Duration,
}

impl BridgeLink {
    pub fn new(outbound: mpsc::Sender<Outbound>, timeout: Duration) -> Self {
        Self {
            outbound,
            pending: DashMap::new(),
            next_id: AtomicU64::new(1),
            timeout,
        }
    }

    /// Deliver a response to the request waiting for it.
    ///
    /// Returns `false` when no request with that id is pending, e.g. because it
    /// already timed out.
    pub fn complete(&self, response: BridgeResponse) -> bool {
        match self.pending.remove(&response.request_id) {
            Some((_, waiter)) => {
                // The waiter may have given up between removal and send.
                let _ = waiter.send(response.status);
                true
            }
            None => false,
        }
    }

    /// Fail every pending request with [`PlatformError::Disconnected`].
    pub fn disconnect(&self) {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            debug!(dropped, "Dropped pending bridge requests");
        }
    }

    /// Number of requests awaiting a response.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    async fn request(&self, action: RequestAction) -> Result<Vec<MessageDescriptor>, PlatformError> {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending.insert(request_id, tx);

        let request = Outbound::Request(BridgeRequest { request_id, action });
        if self.outbound.send(request).await.is_err() {
            self.pending.remove(&request_id);
            return Err(PlatformError::Disconnected);
        }

        let status = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(status)) => status,
            Ok(Err(_)) => return Err(PlatformError::Disconnected),
            Err(_) => {
                self.pending.remove(&request_id);
                return Err(PlatformError::Timeout(self.timeout));
            }
        };

        match status {
            ResponseStatus::Ok { messages } => Ok(messages),
            ResponseStatus::Error { message } => Err(PlatformError::Rejected(message)),
        }
    }
}

#[async_trait]
impl Deleter for BridgeLink {
    async fn delete_one(&self, room: &RoomId, message: &MessageId) -> Result<(), PlatformError> {
        self.request(RequestAction::DeleteOne {
            room: room.clone(),
            message: message.clone(),
        })
        .await
        .map(drop)
    }

    async fn delete_many(
        &self,
        room: &RoomId,
        messages: &[MessageId],
    ) -> Result<(), PlatformError> {
        self.request(RequestAction::DeleteMany {
            room: room.clone(),
            messages: messages.to_vec(),
        })
        .await
        .map(drop)
    }
}

#[async_trait]
impl Platform for BridgeLink {
    async fn fetch_recent(
        &self,
        room: &RoomId,
        limit: usize,
    ) -> Result<Vec<MessageDescriptor>, PlatformError> {
        let messages = self
            .request(RequestAction::FetchRecent {
                room: room.clone(),
                limit,
            })
            .await?;
        if messages.len() > limit {
            return Err(PlatformError::Unexpected(format!(
                "asked for {limit} messages, got {}",
                messages.len()
            )));
        }
        Ok(messages)
    }

    async fn send(&self, notice: Notice) -> Result<(), PlatformError> {
        self.outbound
            .send(Outbound::Notice(notice))
            .await
            .map_err(|_| PlatformError::Disconnected)
    }
}
