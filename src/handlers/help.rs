//! `help` command.

use super::{Context, HandlerResult};
use crate::platform::Platform;
use afk_proto::{MessageEvent, Notice};

const TOPICS: &[(&str, &str)] = &[
    ("afk [reason]", "Set yourself away, here or everywhere."),
    ("afkstatus", "Show your current away status."),
    ("purge [n|all]", "Delete recent messages."),
    ("purge bot [n|all]", "Delete recent bot messages."),
    ("purge @user [n|all]", "Delete recent messages from a user."),
    ("help", "Show this list."),
];

fn help_text(prefix: &str) -> String {
    TOPICS
        .iter()
        .map(|(usage, about)| format!("`{prefix}{usage}` {about}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle<P: Platform + ?Sized>(ctx: &Context<'_, P>, event: &MessageEvent) -> HandlerResult {
    ctx.send(
        Notice::new(event.room.clone(), help_text(&ctx.config.bot.command_prefix))
            .with_title(ctx.heading()),
    )
    .await
}
