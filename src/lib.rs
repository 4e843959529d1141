pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::GameConfig;
pub use crate::core::{
    conversion::ConversionMode,
    generator::QuestionGenerator,
    session::{QuizSession, SessionState, TickOutcome},
    subnet::SubnetSummary,
    tracker::{ProgressTracker, RecordOutcome},
};
pub use domain::model::{Difficulty, QuizCategory, QuizQuestion, QuizResult, UserProfile};
pub use utils::error::{CoreError, Result};
