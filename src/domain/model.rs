use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use uuid::Uuid;

/// XP needed per level step. Level `n` needs `n * XP_PER_LEVEL` to advance.
pub const XP_PER_LEVEL: u32 = 150;

pub const AVATARS: [&str; 12] = [
    "🤖", "🧠", "🚀", "🦊", "🐱", "🦄", "🐼", "🦁", "🐸", "🌟", "⚡️", "🎮",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizCategory {
    BinaryDecimal,
    DecimalHex,
    DecimalOctal,
    HexBinary,
    IpAddressing,
    Subnetting,
    Protocols,
    Mixed,
    DailyChallenge,
}

impl QuizCategory {
    pub const ALL: [QuizCategory; 9] = [
        QuizCategory::BinaryDecimal,
        QuizCategory::DecimalHex,
        QuizCategory::DecimalOctal,
        QuizCategory::HexBinary,
        QuizCategory::IpAddressing,
        QuizCategory::Subnetting,
        QuizCategory::Protocols,
        QuizCategory::Mixed,
        QuizCategory::DailyChallenge,
    ];

    /// Categories that produce questions on their own; `Mixed` draws from these.
    pub const CONCRETE: [QuizCategory; 7] = [
        QuizCategory::BinaryDecimal,
        QuizCategory::DecimalHex,
        QuizCategory::DecimalOctal,
        QuizCategory::HexBinary,
        QuizCategory::IpAddressing,
        QuizCategory::Subnetting,
        QuizCategory::Protocols,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::BinaryDecimal => "Binary ↔ Decimal",
            Self::DecimalHex => "Decimal ↔ Hex",
            Self::DecimalOctal => "Decimal ↔ Octal",
            Self::HexBinary => "Hex ↔ Binary",
            Self::IpAddressing => "IP Addressing",
            Self::Subnetting => "Subnetting",
            Self::Protocols => "Protocols",
            Self::Mixed => "Mixed Challenge",
            Self::DailyChallenge => "Daily Challenge",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::BinaryDecimal => "01.square.fill",
            Self::DecimalHex => "number.circle.fill",
            Self::DecimalOctal => "8.circle.fill",
            Self::HexBinary => "textformat.123",
            Self::IpAddressing => "network",
            Self::Subnetting => "square.grid.3x3.fill",
            Self::Protocols => "arrow.triangle.branch",
            Self::Mixed => "shuffle",
            Self::DailyChallenge => "calendar.circle.fill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub explanation: String,
    pub category: QuizCategory,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub category: QuizCategory,
    pub score: u32,
    pub total_questions: u32,
    pub difficulty: Difficulty,
    pub completed_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl QuizResult {
    /// Fraction of correct answers; an empty quiz counts as 0.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.score, self.total_questions)
    }

    pub fn percentage(&self) -> u32 {
        (self.accuracy() * 100.0) as u32
    }
}

pub(crate) fn accuracy(score: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub avatar_index: usize,
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
    pub last_active: Option<NaiveDate>,
    pub badges: Vec<Badge>,
    pub completed_modules: BTreeSet<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
            avatar_index: 0,
            xp: 0,
            level: 1,
            streak: 0,
            last_active: None,
            badges: Vec::new(),
            completed_modules: BTreeSet::new(),
        }
    }
}

impl UserProfile {
    /// Never zero, even for a stored level of 0.
    pub fn xp_for_next_level(&self) -> u32 {
        self.level.max(1).saturating_mul(XP_PER_LEVEL)
    }

    pub fn level_progress(&self) -> f64 {
        let needed = self.xp_for_next_level();
        f64::from(self.xp % needed) / f64::from(needed)
    }

    pub fn avatar(&self) -> &'static str {
        AVATARS.get(self.avatar_index).copied().unwrap_or(AVATARS[0])
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|badge| badge.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub xp: u32,
    pub level: u32,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStep {
    pub label: String,
    pub value: String,
}

impl ConversionStep {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "Explorer");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp_for_next_level(), 150);
        assert_eq!(profile.level_progress(), 0.0);
        assert_eq!(profile.avatar(), "🤖");
    }

    #[test]
    fn test_category_labels_are_distinct() {
        let titles: std::collections::HashSet<_> =
            QuizCategory::ALL.iter().map(|c| c.title()).collect();
        assert_eq!(titles.len(), QuizCategory::ALL.len());
        assert!(QuizCategory::ALL.iter().all(|c| !c.icon().is_empty()));
    }

    #[test]
    fn test_level_progress() {
        let profile = UserProfile {
            xp: 150,
            level: 2,
            ..UserProfile::default()
        };
        assert_eq!(profile.xp_for_next_level(), 300);
        assert!((profile.level_progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stored_level_zero_does_not_divide_by_zero() {
        let profile: UserProfile = serde_json::from_str(r#"{"level":0,"xp":40}"#).unwrap();
        assert_eq!(profile.xp_for_next_level(), 150);
        assert!((profile.level_progress() - 40.0 / 150.0).abs() < f64::EPSILON);

        let huge = UserProfile {
            level: u32::MAX,
            ..UserProfile::default()
        };
        assert_eq!(huge.xp_for_next_level(), u32::MAX);
    }

    #[test]
    fn test_zero_question_accuracy() {
        let result = QuizResult {
            id: Uuid::new_v4(),
            category: QuizCategory::Mixed,
            score: 0,
            total_questions: 0,
            difficulty: Difficulty::Easy,
            completed_at: Utc::now(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(result.accuracy(), 0.0);
        assert_eq!(result.percentage(), 0);
    }

    #[test]
    fn test_percentage_truncates() {
        assert_eq!((accuracy(2, 3) * 100.0) as u32, 66);
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"name":"Ada","xp":40}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.xp, 40);
        assert_eq!(profile.level, 1);
        assert!(profile.badges.is_empty());
    }
}
