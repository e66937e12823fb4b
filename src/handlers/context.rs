//! Handler context passed to every event handler.

use super::HandlerResult;
use crate::config::Config;
use crate::platform::Platform;
use crate::state::PresenceRegistry;
use afk_proto::Notice;
use chrono::{DateTime, Utc};

/// Everything a handler may touch while processing one event.
pub struct Context<'a, P: ?Sized> {
    /// Away statuses.
    pub registry: &'a PresenceRegistry,
    /// Platform capabilities of the bridge the event came from.
    pub platform: &'a P,
    /// Daemon configuration.
    pub config: &'a Config,
    /// Wall clock time the event was received.
    pub now: DateTime<Utc>,
}

impl<P: Platform + ?Sized> Context<'_, P> {
    /// Post a notice through the platform.
    pub async fn send(&self, notice: Notice) -> HandlerResult {
        self.platform.send(notice).await?;
        Ok(())
    }

    /// Heading used on presence notices.
    pub fn heading(&self) -> String {
        format!("{} AFK System", self.config.bot.name)
    }
}
