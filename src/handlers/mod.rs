//! Event handlers.
//!
//! The [`Dispatcher`] routes inbound bridge events: every chat message runs
//! through return detection, mention pings and command parsing in that order,
//! and the first stage that produces a notice ends processing.

mod context;
mod help;
mod presence;
mod purge;

pub use crate::error::{HandlerError, HandlerResult};
pub use context::Context;

use crate::config::Config;
use crate::platform::Platform;
use crate::state::PresenceRegistry;
use afk_proto::{BotCommand, MessageEvent, PurgeArgs, ScopeChosen};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes events to handlers. Shared by every bridge session.
pub struct Dispatcher {
    registry: Arc<PresenceRegistry>,
    config: Arc<Config>,
}

impl Dispatcher {
    pub fn new(registry: Arc<PresenceRegistry>, config: Arc<Config>) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    fn context<'a, P: Platform + ?Sized>(&'a self, platform: &'a P, now: DateTime<Utc>) -> Context<'a, P> {
        Context {
            registry: &self.registry,
            platform,
            config: &self.config,
            now,
        }
    }

    /// Handle a chat message received at `now`.
    ///
    /// Purges run on their own task; everything else completes before this
    /// returns.
    pub async fn on_message<P: Platform + 'static>(
        &self,
        platform: &Arc<P>,
        event: MessageEvent,
        now: DateTime<Utc>,
    ) -> HandlerResult {
        if event.author.bot {
            return Ok(());
        }

        let ctx = self.context(platform.as_ref(), now);
        if presence::welcome_back(&ctx, &event).await? {
            return Ok(());
        }
        if presence::announce_mentions(&ctx, &event).await? {
            return Ok(());
        }

        let command = BotCommand::parse(&event.content, &self.config.bot.command_prefix, &event.mentions);
        let Some(command) = command else {
            return Ok(());
        };
        debug!(user = %event.author.id, command = ?command, "Command");

        match command {
            BotCommand::Afk { reason } => presence::prompt_scope(&ctx, &event, reason).await,
            BotCommand::AfkStatus => presence::status(&ctx, &event).await,
            BotCommand::Help => help::handle(&ctx, &event).await,
            BotCommand::Purge(args) => {
                self.spawn_purge(Arc::clone(platform), event, args);
                Ok(())
            }
        }
    }

    /// Handle a scope choice made on an `afk` prompt.
    pub async fn on_scope_chosen<P: Platform + ?Sized>(
        &self,
        platform: &P,
        choice: ScopeChosen,
        now: DateTime<Utc>,
    ) -> HandlerResult {
        presence::scope_chosen(&self.context(platform, now), &choice).await
    }

    fn spawn_purge<P: Platform + 'static>(&self, platform: Arc<P>, event: MessageEvent, args: PurgeArgs) {
        let registry = Arc::clone(&self.registry);
        let config = Arc::clone(&self.config);
        tokio::spawn(async move {
            let ctx = Context {
                registry: &registry,
                platform: platform.as_ref(),
                config: &config,
                now: Utc::now(),
            };
            if let Err(e) = purge::handle(&ctx, &event, &args).await {
                warn!(
                    room = ?event.room,
                    error = %e,
                    code = e.error_code(),
                    "Purge handler failed"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{Deletion, FakePlatform};
    use afk_proto::{Author, Mention, MessageDescriptor, MessageId, RoomId, UserId};
    use std::time::Duration;

    fn dispatcher() -> Dispatcher {
        let config: Config = toml::from_str("[bridge]\naddress = \"127.0.0.1:0\"\n").unwrap();
        Dispatcher::new(Arc::new(PresenceRegistry::new()), Arc::new(config))
    }

    fn message(from: &str, content: &str) -> MessageEvent {
        MessageEvent {
            id: MessageId::new("m1"),
            room: Some(RoomId::new("r1")),
            author: Author {
                id: UserId::new(from),
                name: from.to_string(),
                bot: false,
            },
            content: content.to_string(),
            mentions: Vec::new(),
            can_manage_messages: true,
        }
    }

    #[tokio::test]
    async fn bots_are_ignored() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::default());
        d.registry()
            .set_away(&UserId::new("bot"), None, None, true);
        let mut event = message("bot", "?help");
        event.author.bot = true;

        d.on_message(&platform, event, Utc::now()).await.unwrap();
        assert!(platform.notices().is_empty());
        assert!(d.registry().is_away(&UserId::new("bot"), None));
    }

    #[tokio::test]
    async fn returning_user_command_is_not_run() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::default());
        d.registry()
            .set_away(&UserId::new("ann"), None, None, true);

        d.on_message(&platform, message("ann", "?help"), Utc::now())
            .await
            .unwrap();
        let notices = platform.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].body.contains("your AFK has been removed"));
        assert!(d.registry().is_empty());
    }

    #[tokio::test]
    async fn mention_notice_preempts_command() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::default());
        d.registry()
            .set_away(&UserId::new("ann"), None, Some("zzz".into()), true);
        let mut event = message("bob", "?afkstatus <@ann>");
        event.mentions.push(Mention {
            id: UserId::new("ann"),
            name: "ann".into(),
        });

        d.on_message(&platform, event, Utc::now()).await.unwrap();
        let notices = platform.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].body.starts_with("Wassup bob"));
    }

    #[tokio::test]
    async fn commands_are_dispatched_case_insensitively() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::default());

        d.on_message(&platform, message("ann", "?AFKSTATUS"), Utc::now())
            .await
            .unwrap();
        d.on_message(&platform, message("ann", "?nope"), Utc::now())
            .await
            .unwrap();
        d.on_message(&platform, message("ann", "plain chat"), Utc::now())
            .await
            .unwrap();

        let notices = platform.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title.as_deref(), Some("Not AFK"));
    }

    #[tokio::test]
    async fn afk_then_scope_choice_sets_status() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::default());

        d.on_message(&platform, message("ann", "?afk brb"), Utc::now())
            .await
            .unwrap();
        let prompt = platform.notices()[0].prompt.clone().unwrap();

        let choice = ScopeChosen {
            user: message("ann", "").author,
            room: Some(RoomId::new("r1")),
            global: true,
            reason: prompt.reason,
            prompt: Some(MessageId::new("p1")),
        };
        d.on_scope_chosen(platform.as_ref(), choice, Utc::now())
            .await
            .unwrap();

        let record = d
            .registry()
            .peek(&UserId::new("ann"), Some(&RoomId::new("r2")))
            .unwrap();
        assert_eq!(record.reason.as_deref(), Some("brb"));
    }

    #[tokio::test]
    async fn purge_runs_in_background() {
        let d = dispatcher();
        let platform = Arc::new(FakePlatform::with_pool(vec![
            MessageDescriptor {
                id: MessageId::new("m1"),
                author: UserId::new("ann"),
                bot: false,
                created_at: Utc::now(),
            },
            MessageDescriptor {
                id: MessageId::new("m0"),
                author: UserId::new("bob"),
                bot: false,
                created_at: Utc::now(),
            },
        ]));

        d.on_message(&platform, message("ann", "?purge"), Utc::now())
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while platform.notices().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        assert_eq!(
            platform.deletions(),
            vec![
                Deletion::One(MessageId::new("m1")),
                Deletion::One(MessageId::new("m0")),
            ]
        );
        assert_eq!(platform.notices()[0].body, "Deleted 1 messages");
    }
}
