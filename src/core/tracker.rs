use crate::core::leaderboard::{self, LEADERBOARD_CAPACITY};
use crate::core::progression;
use crate::domain::model::{
    Badge, LeaderboardEntry, QuizCategory, QuizResult, UserProfile, AVATARS,
};
use crate::domain::ports::{Clock, ProgressStore};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range};

/// What recording a quiz (or granting XP) changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    pub xp_earned: u32,
    pub levels_gained: u32,
    pub new_badges: Vec<Badge>,
}

pub struct ProgressTracker<S: ProgressStore, C: Clock> {
    store: S,
    clock: C,
    profile: UserProfile,
    results: Vec<QuizResult>,
    leaderboard: Vec<LeaderboardEntry>,
    leaderboard_capacity: usize,
}

impl<S: ProgressStore, C: Clock> ProgressTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_leaderboard_capacity(store, clock, LEADERBOARD_CAPACITY)
    }

    /// Loads saved progress and counts today's visit toward the streak.
    pub fn with_leaderboard_capacity(store: S, clock: C, leaderboard_capacity: usize) -> Self {
        let mut profile = or_default("profile", store.load_profile());
        if profile.level == 0 {
            tracing::warn!("Stored profile has level 0, treating it as level 1");
            profile.level = 1;
        }
        let results = or_default("quiz results", store.load_results());
        let leaderboard = or_default("leaderboard", store.load_leaderboard());

        let mut tracker = Self {
            store,
            clock,
            profile,
            results,
            leaderboard,
            leaderboard_capacity,
        };

        let today = tracker.clock.today();
        if progression::update_streak(&mut tracker.profile, today) {
            tracing::debug!("Streak is now {} day(s)", tracker.profile.streak);
            tracker.save_profile();
        }
        tracker
    }

    /// Grants XP, then unlocks badges, saves and refreshes the leaderboard entry.
    pub fn add_xp(&mut self, amount: u32) -> RecordOutcome {
        let levels_gained = progression::apply_xp(&mut self.profile, amount);
        let new_badges =
            progression::evaluate_badges(&mut self.profile, &self.results, self.clock.now());
        self.save_profile();
        self.refresh_leaderboard();

        RecordOutcome {
            xp_earned: amount,
            levels_gained,
            new_badges,
        }
    }

    /// A run with no questions is not recorded.
    pub fn record_quiz(&mut self, result: QuizResult) -> RecordOutcome {
        if is_empty_run(&result) {
            return RecordOutcome::default();
        }
        let xp = progression::xp_for_result(&result);
        self.push_result(result);
        self.add_xp(xp)
    }

    /// Daily challenge runs earn a flat rate per correct answer and close out today's
    /// challenge.
    pub fn record_daily_challenge(&mut self, result: QuizResult) -> RecordOutcome {
        if is_empty_run(&result) {
            return RecordOutcome::default();
        }
        let xp = progression::daily_challenge_xp(result.score);
        self.push_result(result);

        let today = self.clock.today();
        if let Err(e) = self.store.mark_daily_challenge_done(today) {
            tracing::warn!("Failed to mark daily challenge done for {}: {}", today, e);
        }
        self.add_xp(xp)
    }

    pub fn is_daily_challenge_done(&self) -> bool {
        let today = self.clock.today();
        self.store
            .is_daily_challenge_done(today)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read daily challenge state: {}", e);
                false
            })
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        validate_non_empty_string("profile.name", name)?;
        self.profile.name = name.trim().to_string();
        self.save_profile();
        Ok(())
    }

    pub fn set_avatar(&mut self, index: usize) -> Result<()> {
        validate_range("profile.avatar_index", index, 0, AVATARS.len() - 1)?;
        self.profile.avatar_index = index;
        self.save_profile();
        Ok(())
    }

    /// Returns false if the module was already completed.
    pub fn complete_module(&mut self, module_id: &str) -> bool {
        if !self.profile.completed_modules.insert(module_id.to_string()) {
            return false;
        }
        self.save_profile();
        true
    }

    /// Wipes stored and in-memory progress.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.reset_all() {
            tracing::warn!("Failed to clear stored progress: {}", e);
        }
        self.profile = UserProfile::default();
        self.results.clear();
        self.leaderboard.clear();
        tracing::info!("Progress reset");
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// The player's 1-based leaderboard position.
    pub fn rank(&self) -> Option<usize> {
        leaderboard::rank_of(&self.leaderboard, &self.profile.name)
    }

    pub fn quizzes_taken(&self) -> usize {
        self.results.len()
    }

    pub fn absolute_xp(&self) -> u32 {
        progression::absolute_xp(&self.profile)
    }

    pub fn total_accuracy(&self) -> f64 {
        progression::total_accuracy(&self.results)
    }

    pub fn accuracy_for(&self, category: QuizCategory) -> f64 {
        progression::accuracy_for(&self.results, category)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn push_result(&mut self, result: QuizResult) {
        if let Err(e) = self.store.append_result(&result) {
            tracing::warn!("Failed to save quiz result {}: {}", result.id, e);
        }
        self.results.push(result);
    }

    fn save_profile(&self) {
        if let Err(e) = self.store.save_profile(&self.profile) {
            tracing::warn!("Failed to save profile: {}", e);
        }
    }

    fn refresh_leaderboard(&mut self) {
        let entry = LeaderboardEntry::from_profile(&self.profile, self.clock.now());
        leaderboard::upsert_with_capacity(&mut self.leaderboard, entry, self.leaderboard_capacity);
        if let Err(e) = self.store.save_leaderboard(&self.leaderboard) {
            tracing::warn!("Failed to save leaderboard: {}", e);
        }
    }
}

fn is_empty_run(result: &QuizResult) -> bool {
    if result.total_questions == 0 {
        tracing::warn!("Ignoring {:?} result {} with no questions", result.category, result.id);
        return true;
    }
    false
}

fn or_default<T: Default>(what: &str, loaded: Result<T>) -> T {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load {}, starting fresh: {}", what, e);
        T::default()
    })
}
