//! Message purge: candidate selection and age-based deletion routing.
//!
//! The caller fetches a pool of recent messages and checks permissions; this
//! module decides what to delete and how.

mod route;
mod select;

pub use route::{DeletionPlan, execute};
pub use select::{MAX_PURGE, PurgeCriterion, select};

use crate::platform::Deleter;
use afk_proto::{MessageDescriptor, MessageId, RoomId};
use chrono::{DateTime, Utc};
use tracing::info;

/// Result of a purge that found something to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    /// Messages a deletion was attempted for, successful or not.
    pub attempted: usize,
    /// Messages whose deletion request failed.
    pub failed: usize,
}

/// Outcome of [`select_and_purge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// No message in the pool matched.
    NothingMatched,
    /// Deletions were issued.
    Purged(PurgeReport),
}

/// Select candidates from `pool` and delete them, best effort.
///
/// `attempted` equals the number of selected messages regardless of how many
/// deletions failed.
pub async fn select_and_purge<D>(
    pool: &[MessageDescriptor],
    criterion: &PurgeCriterion,
    requested: i64,
    exclude: &MessageId,
    room: &RoomId,
    deleter: &D,
    now: DateTime<Utc>,
) -> PurgeOutcome
where
    D: Deleter + ?Sized,
{
    let selected = select(pool, criterion, requested, exclude);
    let plan = DeletionPlan::new(&selected, now);
    if plan.is_empty() {
        return PurgeOutcome::NothingMatched;
    }

    let failed = execute(deleter, room, &plan).await;

    let report = PurgeReport {
        attempted: plan.len(),
        failed,
    };
    info!(
        room = %room,
        criterion = ?criterion,
        requested,
        attempted = report.attempted,
        bulk = plan.recent.len(),
        individual = plan.aged.len(),
        failed = report.failed,
        "Purge completed"
    );
    PurgeOutcome::Purged(report)
}
