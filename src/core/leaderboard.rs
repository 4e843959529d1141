use crate::core::progression::absolute_xp;
use crate::domain::model::{LeaderboardEntry, UserProfile};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Default number of entries kept on the board.
pub const LEADERBOARD_CAPACITY: usize = 20;

impl LeaderboardEntry {
    /// Snapshot of a profile ranked by absolute XP.
    pub fn from_profile(profile: &UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: profile.name.clone(),
            xp: absolute_xp(profile),
            level: profile.level,
            recorded_at: now,
        }
    }
}

pub fn upsert(board: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    upsert_with_capacity(board, entry, LEADERBOARD_CAPACITY);
}

/// Replaces any entry with the same name, then keeps the top `capacity` by XP.
///
/// The sort is stable and the new entry goes in last, so among equal XP it ranks below
/// entries already on the board.
pub fn upsert_with_capacity(
    board: &mut Vec<LeaderboardEntry>,
    entry: LeaderboardEntry,
    capacity: usize,
) {
    board.retain(|existing| existing.name != entry.name);
    board.push(entry);
    board.sort_by(|a, b| b.xp.cmp(&a.xp));
    board.truncate(capacity);
}

/// 1-based position of `name`, if it is on the board.
pub fn rank_of(board: &[LeaderboardEntry], name: &str) -> Option<usize> {
    board
        .iter()
        .position(|entry| entry.name == name)
        .map(|index| index + 1)
}
