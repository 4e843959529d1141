use crate::domain::model::{LeaderboardEntry, QuizResult, UserProfile};
use crate::domain::ports::ProgressStore;
use crate::utils::error::{CoreError, Result};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Snapshot {
    profile: Option<UserProfile>,
    results: Vec<QuizResult>,
    leaderboard: Vec<LeaderboardEntry>,
    daily_challenge_done_on: Option<NaiveDate>,
}

/// In-process store. Clones share the same data, so a test can keep a handle
/// while the tracker owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.inner.lock() {
            guard.profile = Some(profile);
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>> {
        self.inner
            .lock()
            .map_err(|_| CoreError::IoError(std::io::Error::other("memory store lock poisoned")))
    }
}

impl ProgressStore for MemoryStore {
    fn load_profile(&self) -> Result<UserProfile> {
        Ok(self.lock()?.profile.clone().unwrap_or_default())
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.lock()?.profile = Some(profile.clone());
        Ok(())
    }

    fn load_results(&self) -> Result<Vec<QuizResult>> {
        Ok(self.lock()?.results.clone())
    }

    fn append_result(&self, result: &QuizResult) -> Result<()> {
        self.lock()?.results.push(result.clone());
        Ok(())
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.lock()?.leaderboard.clone())
    }

    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        self.lock()?.leaderboard = entries.to_vec();
        Ok(())
    }

    fn is_daily_challenge_done(&self, today: NaiveDate) -> Result<bool> {
        Ok(self.lock()?.daily_challenge_done_on == Some(today))
    }

    fn mark_daily_challenge_done(&self, today: NaiveDate) -> Result<()> {
        self.lock()?.daily_challenge_done_on = Some(today);
        Ok(())
    }

    fn reset_all(&self) -> Result<()> {
        *self.lock()? = Snapshot::default();
        Ok(())
    }
}
