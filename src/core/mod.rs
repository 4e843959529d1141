pub mod conversion;
pub mod generator;
pub mod leaderboard;
pub mod progression;
pub mod question_bank;
pub mod session;
pub mod subnet;
pub mod tracker;

pub use crate::domain::model::{QuizCategory, QuizQuestion, QuizResult, UserProfile};
pub use crate::domain::ports::{Clock, ProgressStore, RandomSource};
pub use crate::utils::error::Result;
