use crate::domain::model::Difficulty;
use crate::utils::error::{CoreError, Result};
use crate::utils::validation::{
    validate_non_decreasing, validate_path, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub quiz: QuizConfig,
    pub timer: TimerConfig,
    pub generator: GeneratorConfig,
    pub leaderboard: LeaderboardConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub default_question_count: usize,
    pub daily_question_count: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_question_count: 10,
            daily_question_count: 5,
        }
    }
}

/// Seconds allowed per question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub easy_seconds: u32,
    pub medium_seconds: u32,
    pub hard_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            easy_seconds: 30,
            medium_seconds: 20,
            hard_seconds: 15,
        }
    }
}

impl TimerConfig {
    pub fn seconds_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_seconds,
            Difficulty::Medium => self.medium_seconds,
            Difficulty::Hard => self.hard_seconds,
        }
    }
}

/// Upper bound for random magnitudes in numeric questions, per difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub easy_ceiling: i64,
    pub medium_ceiling: i64,
    pub hard_ceiling: i64,
    pub max_option_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            easy_ceiling: 31,
            medium_ceiling: 63,
            hard_ceiling: 127,
            max_option_attempts: 50,
        }
    }
}

impl GeneratorConfig {
    pub fn ceiling_for(&self, difficulty: Difficulty) -> i64 {
        match difficulty {
            Difficulty::Easy => self.easy_ceiling,
            Difficulty::Medium => self.medium_ceiling,
            Difficulty::Hard => self.hard_ceiling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub capacity: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            capacity: crate::core::leaderboard::LEADERBOARD_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./neuronet-data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl GameConfig {
    /// Loads and validates a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| CoreError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value. An unset variable is an error.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CoreError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        if let Some(missing) = re
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .find(|var_name| std::env::var(var_name).is_err())
        {
            return Err(CoreError::MissingConfigError {
                field: format!("${{{}}}", missing),
            });
        }

        let result = re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        Ok(result.to_string())
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<()> {
        validate_range(
            "quiz.default_question_count",
            self.quiz.default_question_count,
            1,
            100,
        )?;
        validate_range(
            "quiz.daily_question_count",
            self.quiz.daily_question_count,
            1,
            100,
        )?;

        validate_range("timer.easy_seconds", self.timer.easy_seconds, 1, 600)?;
        validate_range("timer.medium_seconds", self.timer.medium_seconds, 1, 600)?;
        validate_range("timer.hard_seconds", self.timer.hard_seconds, 1, 600)?;

        validate_range("generator.easy_ceiling", self.generator.easy_ceiling, 1, 1 << 40)?;
        validate_range("generator.medium_ceiling", self.generator.medium_ceiling, 1, 1 << 40)?;
        validate_range("generator.hard_ceiling", self.generator.hard_ceiling, 1, 1 << 40)?;
        validate_non_decreasing(
            "generator",
            &[
                self.generator.easy_ceiling,
                self.generator.medium_ceiling,
                self.generator.hard_ceiling,
            ],
        )?;
        validate_positive_number(
            "generator.max_option_attempts",
            self.generator.max_option_attempts,
            1,
        )?;

        validate_positive_number("leaderboard.capacity", self.leaderboard.capacity, 1)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        Ok(())
    }
}
