use crate::domain::model::{LeaderboardEntry, QuizResult, UserProfile};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDate, Utc};

/// Key-value persistence for one player's progress.
pub trait ProgressStore: Send + Sync {
    fn load_profile(&self) -> Result<UserProfile>;
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;
    fn load_results(&self) -> Result<Vec<QuizResult>>;
    fn append_result(&self, result: &QuizResult) -> Result<()>;
    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()>;
    fn is_daily_challenge_done(&self, today: NaiveDate) -> Result<bool>;
    fn mark_daily_challenge_done(&self, today: NaiveDate) -> Result<()>;
    fn reset_all(&self) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The player's current calendar day.
    fn today(&self) -> NaiveDate;

    fn days_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        (to - from).num_days()
    }

    fn is_same_day(&self, a: NaiveDate, b: NaiveDate) -> bool {
        a == b
    }

    fn is_consecutive_day(&self, earlier: NaiveDate, later: NaiveDate) -> bool {
        self.days_between(earlier, later) == 1
    }
}

pub trait RandomSource {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn int_in_range(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `0..n`. Callers guarantee `n > 0`.
    fn pick_index(&mut self, n: usize) -> usize;

    fn coin_flip(&mut self) -> bool {
        self.pick_index(2) == 1
    }
}

/// Fisher-Yates shuffle driven by the injected source.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.pick_index(i + 1);
        items.swap(i, j);
    }
}
