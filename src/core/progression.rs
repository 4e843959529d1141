use crate::domain::model::{
    self, Badge, QuizCategory, QuizResult, UserProfile, XP_PER_LEVEL,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// XP per correct answer before the difficulty multiplier.
pub const XP_PER_CORRECT_ANSWER: f64 = 10.0;

/// XP per correct answer in the daily challenge, which ignores difficulty.
pub const DAILY_CHALLENGE_XP_PER_ANSWER: u32 = 20;

/// Adds XP and rolls over as many levels as it covers. Returns the number of levels gained.
pub fn apply_xp(profile: &mut UserProfile, amount: u32) -> u32 {
    profile.xp = profile.xp.saturating_add(amount);

    let mut gained = 0;
    while profile.xp >= profile.xp_for_next_level() {
        profile.xp -= profile.xp_for_next_level();
        profile.level = profile.level.saturating_add(1);
        gained += 1;
    }

    if gained > 0 {
        tracing::info!("Level up: {} reached level {}", profile.name, profile.level);
    }
    gained
}

pub fn xp_for_result(result: &QuizResult) -> u32 {
    (f64::from(result.score) * XP_PER_CORRECT_ANSWER * result.difficulty.multiplier()).round()
        as u32
}

pub fn daily_challenge_xp(score: u32) -> u32 {
    score.saturating_mul(DAILY_CHALLENGE_XP_PER_ANSWER)
}

/// Total XP across all completed levels plus the current one.
pub fn absolute_xp(profile: &UserProfile) -> u32 {
    profile
        .xp
        .saturating_add(profile.level.saturating_sub(1).saturating_mul(XP_PER_LEVEL))
}

/// Advances the daily streak for a visit on `today`. Returns false for a repeat visit on
/// the same day, which changes nothing.
pub fn update_streak(profile: &mut UserProfile, today: NaiveDate) -> bool {
    match profile.last_active {
        Some(last) if last == today => return false,
        Some(last) if (today - last).num_days() == 1 => profile.streak += 1,
        Some(_) | None => profile.streak = 1,
    }
    profile.last_active = Some(today);
    true
}

/// A badge and the condition that unlocks it.
#[derive(Debug, Clone, Copy)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: fn(&UserProfile, &[QuizResult]) -> bool,
}

impl BadgeDefinition {
    pub fn unlock(&self, at: DateTime<Utc>) -> Badge {
        Badge {
            id: self.id.to_string(),
            name: self.name.to_string(),
            icon: self.icon.to_string(),
            description: self.description.to_string(),
            is_unlocked: true,
            unlocked_at: Some(at),
        }
    }
}

/// Evaluated in this order.
pub static BADGE_DEFINITIONS: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "first_quiz",
        name: "First Steps",
        description: "Complete your first quiz",
        icon: "star.fill",
        requirement: |_, results| !results.is_empty(),
    },
    BadgeDefinition {
        id: "ten_quizzes",
        name: "Quiz Master",
        description: "Complete 10 quizzes",
        icon: "rosette",
        requirement: |_, results| results.len() >= 10,
    },
    BadgeDefinition {
        id: "perfect_score",
        name: "Perfectionist",
        description: "Get 100% on any quiz",
        icon: "crown.fill",
        requirement: |_, results| results.iter().any(|r| r.accuracy() >= 1.0),
    },
    BadgeDefinition {
        id: "level_5",
        name: "Rising Star",
        description: "Reach level 5",
        icon: "star.circle.fill",
        requirement: |profile, _| profile.level >= 5,
    },
    BadgeDefinition {
        id: "level_10",
        name: "Network Ninja",
        description: "Reach level 10",
        icon: "bolt.circle.fill",
        requirement: |profile, _| profile.level >= 10,
    },
    BadgeDefinition {
        id: "streak_7",
        name: "Week Warrior",
        description: "7-day streak",
        icon: "flame.fill",
        requirement: |profile, _| profile.streak >= 7,
    },
    BadgeDefinition {
        id: "xp_1000",
        name: "XP Hunter",
        description: "Earn 1000+ total XP",
        icon: "sparkles",
        requirement: |profile, _| absolute_xp(profile) >= 1000,
    },
    BadgeDefinition {
        id: "all_categories",
        name: "Well Rounded",
        description: "Try every quiz category",
        icon: "circle.grid.cross.fill",
        requirement: |_, results| {
            let attempted: HashSet<QuizCategory> = results.iter().map(|r| r.category).collect();
            QuizCategory::ALL.iter().all(|c| attempted.contains(c))
        },
    },
];

pub fn badge_definition(id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_DEFINITIONS.iter().find(|def| def.id == id)
}

/// Unlocks every badge whose requirement now holds, stamping it with `now`.
/// Returns only the badges unlocked by this call.
pub fn evaluate_badges(
    profile: &mut UserProfile,
    results: &[QuizResult],
    now: DateTime<Utc>,
) -> Vec<Badge> {
    let current: &UserProfile = profile;
    let newly_unlocked: Vec<Badge> = BADGE_DEFINITIONS
        .iter()
        .filter(|def| !current.has_badge(def.id))
        .filter(|def| (def.requirement)(current, results))
        .map(|def| def.unlock(now))
        .collect();

    for badge in &newly_unlocked {
        tracing::info!("Badge unlocked: {} ({})", badge.name, badge.id);
    }
    profile.badges.extend(newly_unlocked.iter().cloned());
    newly_unlocked
}

/// Mean accuracy over all results; 0 with no history.
pub fn total_accuracy(results: &[QuizResult]) -> f64 {
    mean_accuracy(results.iter())
}

pub fn accuracy_for(results: &[QuizResult], category: QuizCategory) -> f64 {
    mean_accuracy(results.iter().filter(|r| r.category == category))
}

fn mean_accuracy<'a>(results: impl Iterator<Item = &'a QuizResult>) -> f64 {
    let (sum, count) = results.fold((0.0, 0u32), |(sum, count), r| {
        (sum + model::accuracy(r.score, r.total_questions), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Difficulty;
    use chrono::TimeZone;
    use std::time::Duration;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn result(category: QuizCategory, score: u32, total: u32, difficulty: Difficulty) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            category,
            score,
            total_questions: total,
            difficulty,
            completed_at: now(),
            elapsed: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_apply_xp_crosses_one_level() {
        let mut profile = UserProfile {
            xp: 140,
            ..UserProfile::default()
        };
        assert_eq!(apply_xp(&mut profile, 20), 1);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 10);
    }

    #[test]
    fn test_apply_xp_handles_multi_level_jumps() {
        let mut profile = UserProfile::default();
        // 150 + 300 + 450 = 900 to reach level 4
        assert_eq!(apply_xp(&mut profile, 905), 3);
        assert_eq!(profile.level, 4);
        assert_eq!(profile.xp, 5);
    }

    #[test]
    fn test_apply_xp_is_monotonic() {
        let mut profile = UserProfile::default();
        for amount in [0, 1, 149, 7, 300, 1000, 42, 0, 5000] {
            let before = profile.level;
            apply_xp(&mut profile, amount);
            assert!(profile.level >= before);
            assert!(profile.xp < profile.xp_for_next_level());
        }
    }

    #[test]
    fn test_xp_for_result_applies_multiplier() {
        assert_eq!(xp_for_result(&result(QuizCategory::HexBinary, 7, 10, Difficulty::Easy)), 70);
        assert_eq!(xp_for_result(&result(QuizCategory::HexBinary, 7, 10, Difficulty::Medium)), 105);
        assert_eq!(xp_for_result(&result(QuizCategory::HexBinary, 7, 10, Difficulty::Hard)), 140);
        assert_eq!(xp_for_result(&result(QuizCategory::HexBinary, 0, 10, Difficulty::Hard)), 0);
        assert_eq!(daily_challenge_xp(4), 80);
    }

    #[test]
    fn test_absolute_xp() {
        let profile = UserProfile {
            xp: 20,
            level: 3,
            ..UserProfile::default()
        };
        assert_eq!(absolute_xp(&profile), 320);
        assert_eq!(absolute_xp(&UserProfile::default()), 0);
    }

    #[test]
    fn test_streak_first_visit() {
        let mut profile = UserProfile::default();
        assert!(update_streak(&mut profile, day(2024, 3, 1)));
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.last_active, Some(day(2024, 3, 1)));
    }

    #[test]
    fn test_streak_same_day_is_idempotent() {
        let mut profile = UserProfile::default();
        update_streak(&mut profile, day(2024, 3, 1));
        update_streak(&mut profile, day(2024, 3, 2));
        assert!(!update_streak(&mut profile, day(2024, 3, 2)));
        assert!(!update_streak(&mut profile, day(2024, 3, 2)));
        assert_eq!(profile.streak, 2);
    }

    #[test]
    fn test_streak_consecutive_days_across_month_boundary() {
        let mut profile = UserProfile::default();
        update_streak(&mut profile, day(2024, 2, 28));
        update_streak(&mut profile, day(2024, 2, 29));
        update_streak(&mut profile, day(2024, 3, 1));
        assert_eq!(profile.streak, 3);
    }

    #[test]
    fn test_streak_gap_resets() {
        let mut profile = UserProfile {
            streak: 9,
            last_active: Some(day(2024, 3, 1)),
            ..UserProfile::default()
        };
        assert!(update_streak(&mut profile, day(2024, 3, 3)));
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.last_active, Some(day(2024, 3, 3)));
    }

    #[test]
    fn test_first_quiz_badge_unlocks_once() {
        let mut profile = UserProfile::default();
        let results = vec![result(QuizCategory::Protocols, 3, 5, Difficulty::Easy)];

        let unlocked = evaluate_badges(&mut profile, &results, now());
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first_quiz");
        assert!(unlocked[0].is_unlocked);
        assert_eq!(unlocked[0].unlocked_at, Some(now()));

        assert!(evaluate_badges(&mut profile, &results, now()).is_empty());
        assert_eq!(profile.badges.len(), 1);
    }

    #[test]
    fn test_badges_follow_definition_order() {
        let mut profile = UserProfile {
            level: 10,
            streak: 7,
            ..UserProfile::default()
        };
        let results = vec![result(QuizCategory::Subnetting, 5, 5, Difficulty::Hard)];

        let ids: Vec<String> = evaluate_badges(&mut profile, &results, now())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(
            ids,
            ["first_quiz", "perfect_score", "level_5", "level_10", "streak_7", "xp_1000"]
        );
    }

    #[test]
    fn test_empty_quiz_is_not_perfect() {
        let mut profile = UserProfile::default();
        let results = vec![result(QuizCategory::Mixed, 0, 0, Difficulty::Easy)];
        evaluate_badges(&mut profile, &results, now());
        assert!(!profile.has_badge("perfect_score"));
    }

    #[test]
    fn test_all_categories_needs_every_category() {
        let mut profile = UserProfile::default();
        let mut results: Vec<QuizResult> = QuizCategory::CONCRETE
            .iter()
            .map(|c| result(*c, 1, 2, Difficulty::Easy))
            .collect();
        results.push(result(QuizCategory::Mixed, 1, 2, Difficulty::Easy));
        evaluate_badges(&mut profile, &results, now());
        assert!(!profile.has_badge("all_categories"));

        results.push(result(QuizCategory::DailyChallenge, 1, 2, Difficulty::Easy));
        evaluate_badges(&mut profile, &results, now());
        assert!(profile.has_badge("all_categories"));
        assert!(profile.has_badge("ten_quizzes"));
    }

    #[test]
    fn test_accuracy_aggregates() {
        let results = vec![
            result(QuizCategory::HexBinary, 5, 10, Difficulty::Easy),
            result(QuizCategory::HexBinary, 10, 10, Difficulty::Easy),
            result(QuizCategory::Protocols, 0, 4, Difficulty::Easy),
        ];
        assert!((total_accuracy(&results) - 0.5).abs() < 1e-9);
        assert!((accuracy_for(&results, QuizCategory::HexBinary) - 0.75).abs() < 1e-9);
        assert_eq!(accuracy_for(&results, QuizCategory::Subnetting), 0.0);
        assert_eq!(total_accuracy(&[]), 0.0);
    }

    #[test]
    fn test_badge_lookup() {
        assert_eq!(BADGE_DEFINITIONS.len(), 8);
        assert_eq!(badge_definition("streak_7").map(|d| d.name), Some("Week Warrior"));
        assert!(badge_definition("unknown").is_none());
    }
}
