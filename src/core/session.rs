use crate::config::TimerConfig;
use crate::core::generator::QuestionGenerator;
use crate::domain::model::{self, Difficulty, QuizCategory, QuizQuestion, QuizResult};
use crate::domain::ports::{shuffle, Clock, RandomSource};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    AwaitingAnswer,
    ShowingExplanation,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No armed countdown: not awaiting an answer, or cancelled.
    Ignored,
    Remaining(u32),
    /// The countdown hit zero and an empty answer was submitted.
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub timed_out: bool,
    pub correct_answer: String,
    pub explanation: String,
}

pub struct QuizSession<R: RandomSource, C: Clock> {
    generator: QuestionGenerator<R>,
    clock: C,
    timer: TimerConfig,
    state: SessionState,
    category: QuizCategory,
    difficulty: Difficulty,
    questions: Vec<QuizQuestion>,
    index: usize,
    score: u32,
    selected_answer: Option<String>,
    is_correct: Option<bool>,
    time_remaining: u32,
    timer_armed: bool,
    started_at: Option<DateTime<Utc>>,
}

impl<R: RandomSource, C: Clock> QuizSession<R, C> {
    pub fn new(generator: QuestionGenerator<R>, clock: C) -> Self {
        Self::with_timer(generator, clock, TimerConfig::default())
    }

    pub fn with_timer(generator: QuestionGenerator<R>, clock: C, timer: TimerConfig) -> Self {
        Self {
            generator,
            clock,
            timer,
            state: SessionState::NotStarted,
            category: QuizCategory::BinaryDecimal,
            difficulty: Difficulty::Easy,
            questions: Vec::new(),
            index: 0,
            score: 0,
            selected_answer: None,
            is_correct: None,
            time_remaining: timer.easy_seconds,
            timer_armed: false,
            started_at: None,
        }
    }

    /// Begins a new run, discarding any previous one.
    ///
    /// A count of zero, or a generation failure, finishes the run immediately with 0/0.
    pub fn start(&mut self, category: QuizCategory, difficulty: Difficulty, question_count: usize) {
        self.category = category;
        self.difficulty = difficulty;
        self.score = 0;
        self.index = 0;
        self.selected_answer = None;
        self.is_correct = None;
        self.timer_armed = false;

        let today = self.clock.today();
        let mut questions = match self
            .generator
            .generate_batch(category, difficulty, question_count, today)
        {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("Question generation for {:?} failed: {}", category, e);
                Vec::new()
            }
        };
        // the daily sequence is shared by every player on a given day
        if category != QuizCategory::DailyChallenge {
            shuffle(self.generator.rng_mut(), &mut questions);
        }
        self.questions = questions;
        self.started_at = Some(self.clock.now());

        if self.questions.is_empty() {
            tracing::info!("Quiz {:?} has no questions, finishing immediately", category);
            self.state = SessionState::Finished;
            return;
        }

        tracing::info!(
            "Started {} quiz ({}) with {} questions",
            category.title(),
            difficulty.label(),
            self.questions.len()
        );
        self.state = SessionState::AwaitingAnswer;
        self.arm_timer();
    }

    /// One countdown step. Reaching zero submits an empty (wrong) answer.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::AwaitingAnswer || !self.timer_armed {
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return TickOutcome::Remaining(self.time_remaining);
        }

        tracing::debug!("Question {} timed out", self.index + 1);
        self.submit("", true);
        TickOutcome::TimedOut
    }

    /// Records the player's choice. Returns `None` when no answer is expected, which
    /// includes a second submission for the same question.
    pub fn select_answer(&mut self, answer: &str) -> Option<AnswerFeedback> {
        if self.state != SessionState::AwaitingAnswer {
            return None;
        }
        self.submit(answer, false)
    }

    /// Moves past the explanation. Returns false when there is no answer to move past.
    pub fn advance(&mut self) -> bool {
        if self.state != SessionState::ShowingExplanation {
            return false;
        }

        self.index += 1;
        self.selected_answer = None;
        self.is_correct = None;

        if self.index < self.questions.len() {
            self.state = SessionState::AwaitingAnswer;
            self.arm_timer();
        } else {
            self.state = SessionState::Finished;
            tracing::info!(
                "Finished {} quiz: {}/{}",
                self.category.title(),
                self.score,
                self.questions.len()
            );
        }
        true
    }

    /// Snapshot of a finished run.
    pub fn finalize(&self) -> Option<QuizResult> {
        if self.state != SessionState::Finished {
            return None;
        }

        let now = self.clock.now();
        let elapsed = self
            .started_at
            .map(|started| (now - started).to_std().unwrap_or_default())
            .unwrap_or_default();

        Some(QuizResult {
            id: Uuid::new_v4(),
            category: self.category,
            score: self.score,
            total_questions: self.questions.len() as u32,
            difficulty: self.difficulty,
            completed_at: now,
            elapsed,
        })
    }

    /// Disarms the countdown when the host abandons the run.
    pub fn cancel(&mut self) {
        if self.timer_armed {
            tracing::debug!("Countdown cancelled on question {}", self.index + 1);
        }
        self.timer_armed = false;
    }

    fn arm_timer(&mut self) {
        self.time_remaining = self.timer.seconds_for(self.difficulty);
        self.timer_armed = true;
    }

    fn submit(&mut self, answer: &str, timed_out: bool) -> Option<AnswerFeedback> {
        let question = self.questions.get(self.index)?;
        let is_correct = question.is_correct(answer);
        let feedback = AnswerFeedback {
            is_correct,
            timed_out,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        };

        if is_correct {
            self.score += 1;
        }
        self.selected_answer = Some(answer.to_string());
        self.is_correct = Some(is_correct);
        self.timer_armed = false;
        self.state = SessionState::ShowingExplanation;
        Some(feedback)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn category(&self) -> QuizCategory {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            SessionState::AwaitingAnswer | SessionState::ShowingExplanation => {
                self.questions.get(self.index)
            }
            SessionState::NotStarted | SessionState::Finished => None,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    /// Zero when the run has no questions.
    pub fn accuracy(&self) -> f64 {
        model::accuracy(self.score, self.questions.len() as u32)
    }

    pub fn percentage(&self) -> u32 {
        (self.accuracy() * 100.0) as u32
    }

    /// Fraction of questions already moved past, for progress bars.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            self.index as f64 / self.questions.len() as f64
        }
    }
}
