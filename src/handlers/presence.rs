//! Away-status handlers: return detection, mention pings, `afk` and
//! `afkstatus` commands, and scope selection.

use super::{Context, HandlerError, HandlerResult};
use crate::platform::Platform;
use crate::state::AwayRecord;
use afk_proto::{Author, MessageEvent, Notice, ScopeChosen, ScopePrompt};
use rand::seq::SliceRandom;
use tracing::{debug, info};

const NO_REASON: &str = "No Reason Provided";

fn scope_word(global: bool) -> &'static str {
    if global { "Globally" } else { "Locally" }
}

fn welcome_text(greetings: &[String], author: &Author, record: &AwayRecord, duration: &str) -> String {
    let greeting = greetings
        .choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or("Welcome back!");
    let pinged_by = match &record.last_pinger {
        Some(pinger) => format!("<@{pinger}>"),
        None => "No Pings".to_string(),
    };
    format!(
        "{greeting}\nHello **{name}**, your AFK has been removed.\n\n\
         AFK Duration: `{duration}`\nTimes Pinged: `{pings}`\nPinged By: {pinged_by}",
        name = author.name,
        pings = record.ping_count,
    )
}

/// Clear the author's away status, if any, and greet them.
///
/// Returns `true` when the author was away; such a message gets no further
/// processing.
pub async fn welcome_back<P: Platform + ?Sized>(
    ctx: &Context<'_, P>,
    event: &MessageEvent,
) -> Result<bool, HandlerError> {
    let author = &event.author;
    let Some(record) = ctx.registry.clear_away(&author.id, event.room.as_ref()) else {
        return Ok(false);
    };

    let duration = record.elapsed_label(ctx.now);
    info!(
        user = %author.id,
        scope = scope_word(record.is_global()),
        away_ms = record.away_ms(ctx.now),
        pings = record.ping_count,
        "User returned"
    );

    let body = welcome_text(&ctx.config.presence.greetings, author, &record, &duration);
    ctx.send(
        Notice::new(event.room.clone(), body)
            .with_title(ctx.heading())
            .mentioning(author.id.clone())
            .expiring_after_ms(ctx.config.presence.notice_ttl_ms()),
    )
    .await?;
    Ok(true)
}

/// Count a ping for the first away user mentioned and tell the author.
///
/// Self-mentions are skipped. Returns `true` when a notice was sent; only one
/// notice is sent per message.
pub async fn announce_mentions<P: Platform + ?Sized>(
    ctx: &Context<'_, P>,
    event: &MessageEvent,
) -> Result<bool, HandlerError> {
    let room = event.room.as_ref();
    for mention in &event.mentions {
        if mention.id == event.author.id {
            continue;
        }
        let Some(record) = ctx.registry.peek(&mention.id, room) else {
            continue;
        };
        ctx.registry.record_ping(&mention.id, &event.author.id, room);

        let body = format!(
            "Wassup {author}..? Actually the user you mentioned is Away From Keyboard since `{duration}` with reason: `{reason}`",
            author = event.author.name,
            duration = record.elapsed_label(ctx.now),
            reason = record.reason.as_deref().unwrap_or(NO_REASON),
        );
        ctx.send(
            Notice::new(event.room.clone(), body)
                .mentioning(event.author.id.clone())
                .expiring_after_ms(ctx.config.presence.notice_ttl_ms()),
        )
        .await?;
        return Ok(true);
    }
    Ok(false)
}

/// `afk [reason]`: ask where the status should apply.
///
/// The reason travels with the prompt and comes back in [`ScopeChosen`].
pub async fn prompt_scope<P: Platform + ?Sized>(
    ctx: &Context<'_, P>,
    event: &MessageEvent,
    reason: Option<&str>,
) -> HandlerResult {
    let body = format!(
        "AFK? See you soon! Hey, **{}**\nChoose your AFK Status Type:",
        event.author.name
    );
    ctx.send(
        Notice::new(event.room.clone(), body)
            .with_title(ctx.heading())
            .with_prompt(ScopePrompt {
                reason: reason.map(str::to_string),
            }),
    )
    .await
}

/// `afkstatus`: report the caller's own status.
pub async fn status<P: Platform + ?Sized>(ctx: &Context<'_, P>, event: &MessageEvent) -> HandlerResult {
    let notice = match ctx.registry.peek(&event.author.id, event.room.as_ref()) {
        None => Notice::new(event.room.clone(), "You are not currently AFK.").with_title("Not AFK"),
        Some(record) => {
            let mut body = format!(
                "**Reason:** {}",
                record.reason.as_deref().unwrap_or(NO_REASON)
            );
            if record.ping_count > 0 {
                body.push_str(&format!("\n**Pings:** {}", record.ping_count));
            }
            Notice::new(event.room.clone(), body).with_title(format!(
                "You are AFK {} for {}",
                scope_word(record.is_global()),
                record.elapsed_label(ctx.now)
            ))
        }
    };
    ctx.send(notice).await
}

/// A scope option was picked: set the status unless one already applies.
pub async fn scope_chosen<P: Platform + ?Sized>(ctx: &Context<'_, P>, choice: &ScopeChosen) -> HandlerResult {
    let user = &choice.user.id;
    let room = choice.room.as_ref();

    if ctx.registry.is_away(user, room) {
        debug!(user = %user, "Scope chosen while already away");
        return ctx
            .send(
                Notice::new(
                    choice.room.clone(),
                    "You are already AFK! Send a message to remove your AFK status.",
                )
                .with_title("Already AFK")
                .replacing(choice.prompt.clone()),
            )
            .await;
    }

    let reason = choice
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    let body = format!(
        "Your AFK has been set {} with reason: {}",
        scope_word(choice.global),
        reason.as_deref().unwrap_or(NO_REASON)
    );

    ctx.registry
        .set_away_at(user, room, reason, choice.global, ctx.now);
    info!(user = %user, scope = scope_word(choice.global), "User went away");

    ctx.send(Notice::new(choice.room.clone(), body).replacing(choice.prompt.clone()))
        .await
}
