//! Command grammar typed by users into rooms.
//!
//! Commands start with a configurable prefix (`?` by default) followed by a
//! case-insensitive keyword:
//!
//! - `afk [reason]`
//! - `afkstatus`
//! - `help`
//! - `purge [all | bot [n|all] | @user [n|all] | n]`

use crate::event::Mention;

/// Count requested by the `all` token.
pub const PURGE_ALL: i64 = 100;

/// A recognised bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand<'a> {
    /// Start setting an away status.
    Afk {
        /// Free text after the keyword, trimmed; `None` when empty.
        reason: Option<&'a str>,
    },
    /// Show the caller's own away status.
    AfkStatus,
    /// List available commands.
    Help,
    /// Delete recent messages.
    Purge(PurgeArgs),
}

impl<'a> BotCommand<'a> {
    /// Parse `content` as a command.
    ///
    /// Returns `None` when the content does not start with `prefix` or the
    /// keyword is unknown.
    pub fn parse(content: &'a str, prefix: &str, mentions: &[Mention]) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        let rest = content.strip_prefix(prefix)?;
        let (keyword, tail) = match rest.split_once(' ') {
            Some((keyword, tail)) => (keyword, Some(tail)),
            None => (rest, None),
        };

        match keyword.to_ascii_lowercase().as_str() {
            "afk" => Some(Self::Afk {
                reason: tail.map(str::trim).filter(|r| !r.is_empty()),
            }),
            "afkstatus" if tail.is_none() => Some(Self::AfkStatus),
            "help" if tail.is_none() => Some(Self::Help),
            "purge" => Some(Self::Purge(PurgeArgs::parse(tail.unwrap_or(""), mentions))),
            _ => None,
        }
    }
}

/// Which messages a purge should consider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeFilter {
    /// Any message.
    Recent,
    /// Only messages written by bots.
    Bots,
    /// Only messages written by the mentioned user.
    Author(Mention),
}

/// Parsed `purge` arguments.
///
/// `count` is the raw request; clamping to the supported range happens where
/// the purge runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeArgs {
    /// Candidate filter.
    pub filter: PurgeFilter,
    /// Requested number of messages.
    pub count: i64,
}

impl PurgeArgs {
    /// Parse the whitespace separated arguments following `purge`.
    ///
    /// A mention anywhere in the message selects the author filter, even when
    /// the first argument is numeric. Unparseable counts fall back to 1.
    pub fn parse(args: &str, mentions: &[Mention]) -> Self {
        let mut args = args.split_whitespace();
        let first = args.next();
        let second = args.next();

        match first {
            None => Self::recent(1),
            Some("all") => Self::recent(PURGE_ALL),
            Some("bot") => Self {
                filter: PurgeFilter::Bots,
                count: trailing_count(second),
            },
            Some(token) => match mentions.first() {
                Some(target) => Self {
                    filter: PurgeFilter::Author(target.clone()),
                    count: trailing_count(second),
                },
                None => Self::recent(parse_count(token).unwrap_or(1)),
            },
        }
    }

    fn recent(count: i64) -> Self {
        Self {
            filter: PurgeFilter::Recent,
            count,
        }
    }
}

fn trailing_count(token: Option<&str>) -> i64 {
    match token {
        Some("all") => PURGE_ALL,
        Some(token) => parse_count(token).unwrap_or(1),
        None => 1,
    }
}

/// Parse an optionally signed decimal, truncating any fractional part.
///
/// Out of range values saturate.
fn parse_count(token: &str) -> Option<i64> {
    let (whole, fraction) = token.split_once('.').unwrap_or((token, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = whole
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(whole.parse::<i64>().unwrap_or(if whole.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_signed_and_fractional() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("+7"), Some(7));
        assert_eq!(parse_count("-3"), Some(-3));
        assert_eq!(parse_count("4.9"), Some(4));
        assert_eq!(parse_count("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn parse_count_rejects_garbage() {
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("ten"), None);
        assert_eq!(parse_count("5abc"), None);
        assert_eq!(parse_count("1.x"), None);
    }

    #[test]
    fn empty_prefix_never_matches() {
        assert_eq!(BotCommand::parse("afk", "", &[]), None);
    }
}
