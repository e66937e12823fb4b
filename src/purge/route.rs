//! Deletion routing by message age.
//!
//! The platform's bulk primitive refuses messages older than
//! [`BULK_DELETE_MAX_AGE_DAYS`]; those are deleted one by one. Every request is
//! issued at once and awaited together.

use crate::error::PlatformError;
use crate::platform::Deleter;
use afk_proto::{MessageDescriptor, MessageId, RoomId};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::{BoxFuture, FutureExt, join_all};
use tracing::warn;

/// Age at which a message is no longer eligible for bulk deletion.
pub const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;

/// Selected messages split by deletion strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    /// Younger than the bulk window, newest first.
    pub recent: Vec<MessageId>,
    /// At or beyond the bulk window, newest first.
    pub aged: Vec<MessageId>,
}

impl DeletionPlan {
    /// Partition `selected` by age relative to `now`.
    pub fn new(selected: &[&MessageDescriptor], now: DateTime<Utc>) -> Self {
        let cutoff = Duration::days(BULK_DELETE_MAX_AGE_DAYS);
        let (recent, aged): (Vec<&&MessageDescriptor>, Vec<&&MessageDescriptor>) = selected
            .iter()
            .partition(|message| now - message.created_at < cutoff);

        Self {
            recent: recent.into_iter().map(|m| m.id.clone()).collect(),
            aged: aged.into_iter().map(|m| m.id.clone()).collect(),
        }
    }

    /// Number of messages the plan will try to delete.
    pub fn len(&self) -> usize {
        self.recent.len() + self.aged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a deletion request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Bulk,
    Solo,
    Aged,
}

impl Route {
    fn as_str(self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Solo => "solo",
            Self::Aged => "aged",
        }
    }
}

struct Settled<'a> {
    route: Route,
    first: &'a MessageId,
    count: usize,
    result: Result<(), PlatformError>,
}

/// Issue every deletion in `plan` concurrently and wait for all of them.
///
/// Failures are logged and counted, never propagated. Returns the number of
/// messages whose deletion request failed.
pub async fn execute<D>(deleter: &D, room: &RoomId, plan: &DeletionPlan) -> usize
where
    D: Deleter + ?Sized,
{
    let mut pending: Vec<BoxFuture<'_, Settled<'_>>> = Vec::with_capacity(plan.aged.len() + 1);

    match plan.recent.as_slice() {
        [] => {}
        [only] => pending.push(
            async move {
                Settled {
                    route: Route::Solo,
                    first: only,
                    count: 1,
                    result: deleter.delete_one(room, only).await,
                }
            }
            .boxed(),
        ),
        batch => pending.push(
            async move {
                Settled {
                    route: Route::Bulk,
                    first: &batch[0],
                    count: batch.len(),
                    result: deleter.delete_many(room, batch).await,
                }
            }
            .boxed(),
        ),
    }

    for message in &plan.aged {
        pending.push(
            async move {
                Settled {
                    route: Route::Aged,
                    first: message,
                    count: 1,
                    result: deleter.delete_one(room, message).await,
                }
            }
            .boxed(),
        );
    }

    let mut failed = 0;
    for settled in join_all(pending).await {
        if let Err(error) = settled.result {
            warn!(
                room = %room,
                route = settled.route.as_str(),
                message = %settled.first,
                count = settled.count,
                error = %error,
                "Could not delete message"
            );
            failed += settled.count;
        }
    }
    failed
}
