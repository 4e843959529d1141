use anyhow::{Context, Result};
use chrono::NaiveDate;
use neuronet_core::adapters::{FixedClock, MemoryStore, RngSource};
use neuronet_core::core::generator::daily_question;
use neuronet_core::domain::ports::Clock;
use neuronet_core::{
    Difficulty, ProgressTracker, QuestionGenerator, QuizCategory, QuizSession, SessionState,
    TickOutcome,
};
use std::collections::HashSet;

fn clock() -> FixedClock {
    FixedClock::on_day(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
}

#[test]
fn test_generated_questions_are_well_formed() -> Result<()> {
    let mut generator = QuestionGenerator::new(RngSource::seeded(2024));
    let today = clock().today();

    for category in QuizCategory::ALL {
        for difficulty in Difficulty::ALL {
            for _ in 0..40 {
                let q = generator.generate(category, difficulty, today)?;
                let unique: HashSet<&String> = q.options.iter().collect();
                assert_eq!(q.options.len(), 4, "{:?}: {}", category, q.prompt);
                assert_eq!(unique.len(), 4, "{:?}: {:?}", category, q.options);
                assert_eq!(
                    q.options.iter().filter(|o| **o == q.correct_answer).count(),
                    1,
                    "{:?}: {}",
                    category,
                    q.prompt
                );
                assert!(!q.explanation.is_empty());
                if category == QuizCategory::Mixed {
                    assert!(QuizCategory::CONCRETE.contains(&q.category));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_same_seed_same_quiz() -> Result<()> {
    let today = clock().today();
    let mut a = QuestionGenerator::new(RngSource::seeded(99));
    let mut b = QuestionGenerator::new(RngSource::seeded(99));
    assert_eq!(
        a.generate_batch(QuizCategory::Mixed, Difficulty::Hard, 10, today)?,
        b.generate_batch(QuizCategory::Mixed, Difficulty::Hard, 10, today)?
    );
    Ok(())
}

#[test]
fn test_daily_challenge_is_stable_within_a_day() {
    let today = clock().today();
    for position in 0..5 {
        assert_eq!(daily_question(today, position), daily_question(today, position));
    }
    assert_eq!(daily_question(today, 1), daily_question(today.succ_opt().unwrap(), 0));
}

#[test]
fn test_zero_question_quiz_finishes_with_no_score() -> Result<()> {
    let clock = clock();
    let mut session = QuizSession::new(QuestionGenerator::new(RngSource::seeded(1)), &clock);
    session.start(QuizCategory::Subnetting, Difficulty::Medium, 0);

    assert_eq!(session.state(), SessionState::Finished);
    let result = session.finalize().context("finished session has a result")?;
    assert_eq!((result.score, result.total_questions), (0, 0));
    assert_eq!(result.accuracy(), 0.0);
    assert_eq!(result.percentage(), 0);
    Ok(())
}

#[test]
fn test_full_quiz_feeds_progress() -> Result<()> {
    let clock = clock();
    let store = MemoryStore::new();
    let mut tracker = ProgressTracker::new(store, &clock);
    let mut session = QuizSession::new(QuestionGenerator::new(RngSource::seeded(5)), &clock);

    session.start(QuizCategory::DecimalHex, Difficulty::Medium, 4);
    let mut expected_score = 0;
    for i in 0..4 {
        let question = session.current_question().context("question available")?.clone();
        if i == 3 {
            // last one runs out of time
            while session.tick() != TickOutcome::TimedOut {}
        } else {
            let feedback = session
                .select_answer(&question.correct_answer)
                .context("answer accepted")?;
            assert!(feedback.is_correct);
            expected_score += 1;
        }
        assert!(session.advance());
    }

    let result = session.finalize().context("finished")?;
    assert_eq!(result.score, expected_score);
    assert_eq!(result.total_questions, 4);

    // 3 × 10 × 1.5
    let outcome = tracker.record_quiz(result);
    assert_eq!(outcome.xp_earned, 45);
    assert_eq!(outcome.levels_gained, 0);
    assert_eq!(outcome.new_badges.len(), 1);
    assert_eq!(tracker.profile().xp, 45);
    assert_eq!(tracker.rank(), Some(1));
    Ok(())
}

#[test]
fn test_daily_challenge_round() -> Result<()> {
    let clock = clock();
    let mut tracker = ProgressTracker::new(MemoryStore::new(), &clock);
    let mut session = QuizSession::new(QuestionGenerator::new(RngSource::seeded(3)), &clock);

    session.start(QuizCategory::DailyChallenge, Difficulty::Hard, 5);
    while let Some(question) = session.current_question().cloned() {
        session.select_answer(&question.correct_answer);
        session.advance();
    }
    let result = session.finalize().context("finished")?;
    assert_eq!(result.score, 5);

    let outcome = tracker.record_daily_challenge(result);
    assert_eq!(outcome.xp_earned, 100);
    assert!(tracker.is_daily_challenge_done());
    Ok(())
}
