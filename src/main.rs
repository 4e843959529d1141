use anyhow::{Context, Result};
use clap::Parser;
use neuronet_core::adapters::{JsonFileStore, RngSource, SystemClock, Ticker};
use neuronet_core::config::cli::{Cli, Command};
use neuronet_core::config::LogFormat;
use neuronet_core::core::conversion::{ip_to_binary_dotted, ConversionMode};
use neuronet_core::core::progression::BADGE_DEFINITIONS;
use neuronet_core::core::subnet::{broadcast_address, network_address};
use neuronet_core::utils::error::ErrorSeverity;
use neuronet_core::utils::validation::{validate_range, Validate};
use neuronet_core::utils::logger;
use neuronet_core::{
    CoreError, Difficulty, GameConfig, ProgressTracker, QuestionGenerator, QuizCategory,
    QuizResult, QuizSession, RecordOutcome, SessionState, SubnetSummary, TickOutcome,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

type Tracker = ProgressTracker<JsonFileStore, SystemClock>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose || config.logging.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }
    tracing::debug!("Game config: {:?}", config);

    if let Err(e) = run(cli.command, &config).await {
        let exit_code = match e.downcast_ref::<CoreError>() {
            Some(core_error) => {
                tracing::error!(
                    "{} (Category: {:?}, Severity: {:?})",
                    core_error,
                    core_error.category(),
                    core_error.severity()
                );
                eprintln!("❌ {}", core_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", core_error.recovery_suggestion());
                match core_error.severity() {
                    ErrorSeverity::Low => 2,
                    ErrorSeverity::Medium | ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                tracing::error!("{:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &Cli) -> neuronet_core::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }
    config.validate()?;
    Ok(config)
}

fn open_tracker(config: &GameConfig) -> Tracker {
    ProgressTracker::with_leaderboard_capacity(
        JsonFileStore::new(&config.storage.data_dir),
        SystemClock,
        config.leaderboard.capacity,
    )
}

async fn run(command: Command, config: &GameConfig) -> Result<()> {
    match command {
        Command::Convert { mode, value, steps } => convert(mode.into(), &value, steps)?,
        Command::Subnet { prefix, ip } => subnet(prefix, ip.as_deref())?,
        Command::Quiz {
            category,
            difficulty,
            count,
        } => {
            let count = count.unwrap_or(config.quiz.default_question_count);
            validate_range("quiz.count", count, 1, 100)?;
            let mut tracker = open_tracker(config);
            if let Some(result) = play(config, category.into(), difficulty.into(), count).await? {
                print_outcome(&tracker.record_quiz(result));
            }
        }
        Command::Daily => {
            let mut tracker = open_tracker(config);
            if tracker.is_daily_challenge_done() {
                println!("✅ Today's challenge is already done. Come back tomorrow!");
                return Ok(());
            }
            let count = config.quiz.daily_question_count;
            if let Some(result) =
                play(config, QuizCategory::DailyChallenge, Difficulty::Hard, count).await?
            {
                print_outcome(&tracker.record_daily_challenge(result));
            }
        }
        Command::Profile { name, avatar } => {
            let mut tracker = open_tracker(config);
            if let Some(name) = name {
                tracker.rename(&name)?;
            }
            if let Some(avatar) = avatar {
                tracker.set_avatar(avatar)?;
            }
            print_profile(&tracker);
        }
        Command::Leaderboard => print_leaderboard(&open_tracker(config)),
        Command::Reset { yes } => {
            if !yes {
                println!("This deletes all saved progress. Re-run with --yes to confirm.");
                return Ok(());
            }
            open_tracker(config).reset();
            println!("🗑  Progress reset");
        }
    }
    Ok(())
}

fn convert(mode: ConversionMode, value: &str, show_steps: bool) -> Result<()> {
    let output = mode.convert(value)?;
    println!("{}: {} → {}", mode.label(), value.trim(), output);

    if show_steps {
        for (i, step) in mode.steps(value)?.iter().enumerate() {
            println!("  {:>2}. {:<44} {}", i + 1, step.label, step.value);
        }
    }
    Ok(())
}

fn subnet(prefix: i64, ip: Option<&str>) -> Result<()> {
    let summary = SubnetSummary::for_prefix(prefix)?;
    println!("Prefix:          /{}", summary.prefix);
    println!("Subnet mask:     {}", summary.mask);
    println!("Binary mask:     {}", summary.binary_mask);
    println!("Network bits:    {}", summary.network_bits);
    println!("Host bits:       {}", summary.host_bits);
    println!("Total addresses: {}", summary.total_addresses);
    println!("Usable hosts:    {}", summary.usable_hosts);

    if let Some(ip) = ip {
        println!("Address:         {}", ip);
        println!("Binary:          {}", ip_to_binary_dotted(ip)?);
        println!("Network:         {}", network_address(ip, prefix)?);
        println!("Broadcast:       {}", broadcast_address(ip, prefix)?);
    }
    Ok(())
}

/// Runs one session on stdin. Returns `None` if stdin closes mid-quiz.
async fn play(
    config: &GameConfig,
    category: QuizCategory,
    difficulty: Difficulty,
    count: usize,
) -> Result<Option<QuizResult>> {
    let generator = QuestionGenerator::with_config(RngSource::from_entropy(), config.generator);
    let mut session = QuizSession::with_timer(generator, SystemClock, config.timer);
    session.start(category, difficulty, count);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(question) = session.current_question().cloned() {
        println!(
            "\n{} {}  Question {}/{}  ⏱ {}s",
            category.icon(),
            category.title(),
            session.current_index() + 1,
            session.total_questions(),
            session.time_remaining()
        );
        println!("{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        let (ticker, mut ticks) = Ticker::start(Duration::from_secs(1));
        while session.state() == SessionState::AwaitingAnswer {
            tokio::select! {
                Some(()) = ticks.recv() => {
                    match session.tick() {
                        TickOutcome::Remaining(seconds) if seconds <= 5 => println!("⏱ {}s left", seconds),
                        TickOutcome::TimedOut => println!("⏰ Time's up!"),
                        _ => {}
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read answer")? else {
                        session.cancel();
                        return Ok(None);
                    };
                    let answer = resolve_choice(&question.options, &line);
                    session.select_answer(&answer);
                }
            }
        }
        ticker.cancel();

        if session.is_correct() == Some(true) {
            println!("✅ Correct!");
        } else {
            println!("❌ The answer was {}", question.correct_answer);
        }
        println!("💡 {}", question.explanation);
        session.advance();
    }

    let result = session.finalize();
    if let Some(result) = &result {
        println!(
            "\n🏁 Score {}/{} ({}%) in {}s",
            result.score,
            result.total_questions,
            result.percentage(),
            result.elapsed.as_secs()
        );
    }
    Ok(result)
}

/// "2" picks the second option; anything else is taken as typed.
fn resolve_choice(options: &[String], input: &str) -> String {
    let input = input.trim();
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

fn print_outcome(outcome: &RecordOutcome) {
    println!("⭐ +{} XP", outcome.xp_earned);
    if outcome.levels_gained > 0 {
        println!("🎉 Level up! (+{})", outcome.levels_gained);
    }
    for badge in &outcome.new_badges {
        println!("🏅 Badge unlocked: {} ({})", badge.name, badge.description);
    }
}

fn print_profile(tracker: &Tracker) {
    let profile = tracker.profile();
    println!("{} {}", profile.avatar(), profile.name);
    println!(
        "Level {}  {}/{} XP  ({} total)",
        profile.level,
        profile.xp,
        profile.xp_for_next_level(),
        tracker.absolute_xp()
    );
    println!("🔥 Streak: {} day(s)", profile.streak);
    println!(
        "Quizzes: {}  Accuracy: {:.0}%",
        tracker.quizzes_taken(),
        tracker.total_accuracy() * 100.0
    );

    println!("\nCategories:");
    for category in QuizCategory::ALL {
        println!(
            "  {} {:<20} {:.0}%",
            category.icon(),
            category.title(),
            tracker.accuracy_for(category) * 100.0
        );
    }

    println!("\nBadges:");
    for def in BADGE_DEFINITIONS {
        let mark = if profile.has_badge(def.id) { "✓" } else { "·" };
        println!("  {} {:<16} {}", mark, def.name, def.description);
    }
}

fn print_leaderboard(tracker: &Tracker) {
    if tracker.leaderboard().is_empty() {
        println!("No scores yet. Play a quiz to get on the board!");
        return;
    }
    for (i, entry) in tracker.leaderboard().iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>6} XP  Lv {}",
            i + 1,
            entry.name,
            entry.xp,
            entry.level
        );
    }
}
