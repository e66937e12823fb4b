//! Away-status notice configuration.

use serde::Deserialize;

/// Away-status notice configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Seconds before "welcome back" and "user is away" notices are removed (default: 5).
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,
    /// Greeting lines picked at random when someone returns.
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl(),
            greetings: default_greetings(),
        }
    }
}

impl PresenceConfig {
    /// Notice lifetime in milliseconds.
    pub fn notice_ttl_ms(&self) -> u64 {
        self.notice_ttl_secs.saturating_mul(1000)
    }
}

fn default_notice_ttl() -> u64 {
    5
}

fn default_greetings() -> Vec<String> {
    [
        "You're back!",
        "Missed you",
        "Welcome home",
        "You're here again!",
        "AFK? Not anymore!",
        "Yay! You're here",
        "All done resting?",
        "Boop! You're back!",
        "Hello again~",
        "Offline? Never again!",
        "Joined the chat!",
        "Poof! You appeared!",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
