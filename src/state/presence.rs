//! Away-status (AFK) registry.
//!
//! This module contains the `PresenceRegistry`, which owns every active away
//! record for the lifetime of the process.
//!
//! A user can be away globally or in a single room. The two scopes are
//! mutually exclusive per room context: setting one deletes the other at write
//! time, and every lookup checks the global index before the room index.

use afk_proto::{RoomId, UserId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Room context of a room-scoped record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomKey {
    /// A real room.
    Room(RoomId),
    /// The direct-message pseudo-room.
    Direct,
}

impl RoomKey {
    /// Map an optional room to a key; `None` is the direct-message context.
    pub fn from_room(room: Option<&RoomId>) -> Self {
        match room {
            Some(room) => Self::Room(room.clone()),
            None => Self::Direct,
        }
    }
}

/// Where an away status applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AwayScope {
    /// Every room.
    Global,
    /// One room (or direct messages).
    Room(RoomKey),
}

/// An active away status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwayRecord {
    pub user: UserId,
    pub scope: AwayScope,
    pub set_at: DateTime<Utc>,
    /// `None` means no reason was given.
    pub reason: Option<String>,
    pub ping_count: u64,
    /// Most recent user that mentioned this one while away.
    pub last_pinger: Option<UserId>,
}

impl AwayRecord {
    fn new(user: UserId, scope: AwayScope, reason: Option<String>, set_at: DateTime<Utc>) -> Self {
        Self {
            user,
            scope,
            set_at,
            reason,
            ping_count: 0,
            last_pinger: None,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self.scope, AwayScope::Global)
    }

    /// Milliseconds between `set_at` and `now`, zero if the clock went backwards.
    pub fn away_ms(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.set_at).num_milliseconds()).unwrap_or(0)
    }

    /// Compact label for how long this user has been away (e.g. "1h 5m").
    pub fn elapsed_label(&self, now: DateTime<Utc>) -> String {
        elapsed_label(self.away_ms(now))
    }
}

#[derive(Debug, Default)]
struct Indexes {
    global: HashMap<UserId, AwayRecord>,
    rooms: HashMap<UserId, HashMap<RoomKey, AwayRecord>>,
}

impl Indexes {
    fn resolve(&self, user: &UserId, room: &RoomKey) -> Option<&AwayRecord> {
        if let Some(record) = self.global.get(user) {
            return Some(record);
        }
        self.rooms.get(user).and_then(|rooms| rooms.get(room))
    }

    fn resolve_mut(&mut self, user: &UserId, room: &RoomKey) -> Option<&mut AwayRecord> {
        if let Some(record) = self.global.get_mut(user) {
            return Some(record);
        }
        self.rooms.get_mut(user).and_then(|rooms| rooms.get_mut(room))
    }

    fn remove_room(&mut self, user: &UserId, room: &RoomKey) -> Option<AwayRecord> {
        let rooms = self.rooms.get_mut(user)?;
        let removed = rooms.remove(room);
        if rooms.is_empty() {
            self.rooms.remove(user);
        }
        removed
    }
}

/// In-memory registry of away statuses.
///
/// All operations take one coarse lock and never suspend, so the registry can
/// be shared across tasks behind an `Arc`.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    inner: Mutex<Indexes>,
}

impl PresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user` away, starting the clock now.
    ///
    /// See [`set_away_at`](Self::set_away_at).
    #[cfg(test)]
    pub fn set_away(
        &self,
        user: &UserId,
        room: Option<&RoomId>,
        reason: Option<String>,
        global: bool,
    ) {
        self.set_away_at(user, room, reason, global, Utc::now());
    }

    /// Mark `user` away as of `at`.
    ///
    /// Replaces any record with the same scope, resetting its ping counter.
    /// A global status deletes the user's record for `room`; a room status
    /// deletes the user's global record.
    pub fn set_away_at(
        &self,
        user: &UserId,
        room: Option<&RoomId>,
        reason: Option<String>,
        global: bool,
        at: DateTime<Utc>,
    ) {
        let room = RoomKey::from_room(room);
        let mut indexes = self.inner.lock();

        if global {
            let record = AwayRecord::new(user.clone(), AwayScope::Global, reason, at);
            indexes.global.insert(user.clone(), record);
            indexes.remove_room(user, &room);
        } else {
            let record = AwayRecord::new(user.clone(), AwayScope::Room(room.clone()), reason, at);
            indexes
                .rooms
                .entry(user.clone())
                .or_default()
                .insert(room.clone(), record);
            indexes.global.remove(user);
        }

        debug!(user = %user, room = ?room, global, "Away status set");
    }

    /// Remove and return the record that applies to `user` in `room`.
    ///
    /// A global record wins and is returned regardless of `room`, so the
    /// returned scope may differ from the room the caller asked about.
    pub fn clear_away(&self, user: &UserId, room: Option<&RoomId>) -> Option<AwayRecord> {
        let mut indexes = self.inner.lock();

        let removed = match indexes.global.remove(user) {
            Some(record) => Some(record),
            None => indexes.remove_room(user, &RoomKey::from_room(room)),
        };

        if let Some(record) = &removed {
            debug!(user = %user, scope = ?record.scope, pings = record.ping_count, "Away status cleared");
        }
        removed
    }

    /// Whether `user` is away in `room` (global first).
    pub fn is_away(&self, user: &UserId, room: Option<&RoomId>) -> bool {
        self.inner
            .lock()
            .resolve(user, &RoomKey::from_room(room))
            .is_some()
    }

    /// Snapshot of the record that applies to `user` in `room`, if any.
    pub fn peek(&self, user: &UserId, room: Option<&RoomId>) -> Option<AwayRecord> {
        self.inner
            .lock()
            .resolve(user, &RoomKey::from_room(room))
            .cloned()
    }

    /// Count a mention of `user` by `pinger`. No-op when `user` is not away.
    pub fn record_ping(&self, user: &UserId, pinger: &UserId, room: Option<&RoomId>) {
        let mut indexes = self.inner.lock();
        if let Some(record) = indexes.resolve_mut(user, &RoomKey::from_room(room)) {
            record.ping_count += 1;
            record.last_pinger = Some(pinger.clone());
            debug!(user = %user, pinger = %pinger, pings = record.ping_count, "Away ping recorded");
        }
    }

    /// Number of active records across both scopes.
    pub fn len(&self) -> usize {
        let indexes = self.inner.lock();
        indexes.global.len() + indexes.rooms.values().map(HashMap::len).sum::<usize>()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const MS_PER_SECOND: u64 = 1000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Format a duration as space-separated `d`, `h`, `m`, `s` units.
///
/// Each unit is capped to its natural range (hours 0-23, minutes and seconds
/// 0-59), zero units are skipped, and sub-second remainders are dropped. An
/// all-zero duration is `"0s"`.
pub fn elapsed_label(duration_ms: u64) -> String {
    let total_seconds = duration_ms / MS_PER_SECOND;
    let units = [
        (total_seconds / SECONDS_PER_DAY, 'd'),
        ((total_seconds / 3600) % 24, 'h'),
        ((total_seconds / 60) % 60, 'm'),
        (total_seconds % 60, 's'),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
