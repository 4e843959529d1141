use crate::domain::model::{LeaderboardEntry, QuizResult, UserProfile};
use crate::domain::ports::ProgressStore;
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "neuronet_user_profile.json";
const RESULTS_FILE: &str = "neuronet_quiz_results.json";
const LEADERBOARD_FILE: &str = "neuronet_leaderboard.json";
const DAILY_CHALLENGE_FILE: &str = "neuronet_daily_challenge.json";

#[derive(Debug, Serialize, Deserialize)]
struct DailyChallengeMarker {
    date: NaiveDate,
    completed: bool,
}

/// One pretty-printed JSON document per concern inside `base_path`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let full_path = self.base_path.join(file);
        match fs::read(&full_path) {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        let full_path = self.base_path.join(file);
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp_path, &full_path)?;
        tracing::debug!("Wrote {}", full_path.display());
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn load_profile(&self) -> Result<UserProfile> {
        Ok(self.read(PROFILE_FILE)?.unwrap_or_default())
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write(PROFILE_FILE, profile)
    }

    fn load_results(&self) -> Result<Vec<QuizResult>> {
        Ok(self.read(RESULTS_FILE)?.unwrap_or_default())
    }

    fn append_result(&self, result: &QuizResult) -> Result<()> {
        let mut results = self.load_results()?;
        results.push(result.clone());
        self.write(RESULTS_FILE, &results)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.read(LEADERBOARD_FILE)?.unwrap_or_default())
    }

    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        self.write(LEADERBOARD_FILE, entries)
    }

    fn is_daily_challenge_done(&self, today: NaiveDate) -> Result<bool> {
        let marker: Option<DailyChallengeMarker> = self.read(DAILY_CHALLENGE_FILE)?;
        Ok(marker.is_some_and(|m| m.completed && m.date == today))
    }

    fn mark_daily_challenge_done(&self, today: NaiveDate) -> Result<()> {
        self.write(
            DAILY_CHALLENGE_FILE,
            &DailyChallengeMarker {
                date: today,
                completed: true,
            },
        )
    }

    fn reset_all(&self) -> Result<()> {
        for file in [PROFILE_FILE, RESULTS_FILE, LEADERBOARD_FILE, DAILY_CHALLENGE_FILE] {
            match fs::remove_file(self.base_path.join(file)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!("Cleared saved progress in {}", self.base_path.display());
        Ok(())
    }
}
