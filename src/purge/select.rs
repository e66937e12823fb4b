//! Candidate selection for purges.

use afk_proto::{MessageDescriptor, MessageId, UserId};

/// Most messages a single purge may delete (and fetch).
pub const MAX_PURGE: usize = 100;

/// Which messages a purge considers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeCriterion {
    /// Any message.
    Recent,
    /// Messages by one author.
    ByAuthor(UserId),
    /// Messages by bot accounts.
    BotOnly,
}

impl PurgeCriterion {
    fn matches(&self, message: &MessageDescriptor) -> bool {
        match self {
            Self::Recent => true,
            Self::ByAuthor(author) => &message.author == author,
            Self::BotOnly => message.bot,
        }
    }
}

/// Clamp a requested count into `1..=MAX_PURGE`.
pub fn clamp_count(requested: i64) -> usize {
    // Lossless: the clamped value is within 1..=100.
    requested.clamp(1, MAX_PURGE as i64) as usize
}

/// Pick up to `requested` (clamped) messages matching `criterion`.
///
/// Pool order is preserved and the triggering command message is never
/// selected.
pub fn select<'a>(
    pool: &'a [MessageDescriptor],
    criterion: &PurgeCriterion,
    requested: i64,
    exclude: &MessageId,
) -> Vec<&'a MessageDescriptor> {
    pool.iter()
        .filter(|message| &message.id != exclude && criterion.matches(message))
        .take(clamp_count(requested))
        .collect()
}
