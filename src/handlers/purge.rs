//! `purge` command: permission check, pool fetch, then select and delete.

use super::{Context, HandlerResult};
use crate::error::PlatformError;
use crate::platform::Platform;
use crate::purge::{MAX_PURGE, PurgeCriterion, PurgeOutcome, select_and_purge};
use afk_proto::{MessageEvent, Notice, PurgeArgs, PurgeFilter};
use chrono::Utc;
use tracing::{debug, error};

const NO_PERMISSION: &str = "You do not have permission to manage messages.";
const NOTHING_FOUND: &str = "No messages found to delete with the specified criteria.";
const FAILED: &str = "An error occurred while trying to delete messages.";

fn criterion(filter: &PurgeFilter) -> PurgeCriterion {
    match filter {
        PurgeFilter::Recent => PurgeCriterion::Recent,
        PurgeFilter::Bots => PurgeCriterion::BotOnly,
        PurgeFilter::Author(mention) => PurgeCriterion::ByAuthor(mention.id.clone()),
    }
}

fn summary(filter: &PurgeFilter, attempted: usize) -> String {
    match filter {
        PurgeFilter::Recent => format!("Deleted {attempted} messages"),
        PurgeFilter::Bots => format!("Deleted {attempted} bot messages"),
        PurgeFilter::Author(mention) if mention.name.is_empty() => {
            format!("Deleted {attempted} messages from <@{}>", mention.id)
        }
        PurgeFilter::Author(mention) => {
            format!("Deleted {attempted} messages from {}", mention.name)
        }
    }
}

/// Run a purge requested by `event`.
///
/// Deletion failures are swallowed by the router; only a failure to fetch the
/// pool or to delete the command message itself is reported as an error.
pub async fn handle<P: Platform + ?Sized>(
    ctx: &Context<'_, P>,
    event: &MessageEvent,
    args: &PurgeArgs,
) -> HandlerResult {
    let ttl = ctx.config.purge.notice_ttl_ms();
    let notice = |body: String| {
        Notice::new(event.room.clone(), body)
            .mentioning(event.author.id.clone())
            .expiring_after_ms(ttl)
    };

    let Some(room) = event.room.as_ref().filter(|_| event.can_manage_messages) else {
        debug!(user = %event.author.id, "Purge refused");
        return ctx.send(notice(NO_PERMISSION.to_string())).await;
    };

    let prepared = async {
        let pool = ctx.platform.fetch_recent(room, MAX_PURGE).await?;
        ctx.platform.delete_one(room, &event.id).await?;
        Ok::<_, PlatformError>(pool)
    }
    .await;

    let pool = match prepared {
        Ok(pool) => pool,
        Err(e) => {
            error!(room = %room, error = %e, "Purge failed");
            ctx.send(notice(FAILED.to_string())).await?;
            return Err(e.into());
        }
    };

    let outcome = select_and_purge(
        &pool,
        &criterion(&args.filter),
        args.count,
        &event.id,
        room,
        ctx.platform,
        Utc::now(),
    )
    .await;

    let body = match outcome {
        PurgeOutcome::NothingMatched => NOTHING_FOUND.to_string(),
        PurgeOutcome::Purged(report) => summary(&args.filter, report.attempted),
    };
    ctx.send(notice(body)).await
}
