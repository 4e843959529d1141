use crate::core::conversion::ConversionMode;
use crate::domain::model::{Difficulty, QuizCategory};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "neuronet")]
#[command(about = "Practice number bases and networking in the terminal")]
pub struct Cli {
    #[arg(long, help = "Path to a TOML game configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the directory where progress is saved")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a value and print the worked steps
    Convert {
        #[arg(value_enum)]
        mode: ModeArg,
        value: String,
        #[arg(long, help = "Print the step-by-step derivation")]
        steps: bool,
    },
    /// Summarise a prefix length, optionally for a specific address
    Subnet {
        prefix: i64,
        #[arg(long)]
        ip: Option<String>,
    },
    /// Play a quiz
    Quiz {
        #[arg(long, value_enum, default_value = "binary-decimal")]
        category: CategoryArg,
        #[arg(long, value_enum, default_value = "easy")]
        difficulty: DifficultyArg,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Play today's challenge
    Daily,
    /// Show level, streak and badges
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<usize>,
    },
    /// Show the leaderboard
    Leaderboard,
    /// Delete all saved progress
    Reset {
        #[arg(long, help = "Confirm deletion")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    DecToBin,
    BinToDec,
    DecToHex,
    HexToDec,
    DecToOct,
    OctToDec,
    HexToBin,
    BinToHex,
}

impl From<ModeArg> for ConversionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::DecToBin => ConversionMode::DecimalToBinary,
            ModeArg::BinToDec => ConversionMode::BinaryToDecimal,
            ModeArg::DecToHex => ConversionMode::DecimalToHex,
            ModeArg::HexToDec => ConversionMode::HexToDecimal,
            ModeArg::DecToOct => ConversionMode::DecimalToOctal,
            ModeArg::OctToDec => ConversionMode::OctalToDecimal,
            ModeArg::HexToBin => ConversionMode::HexToBinary,
            ModeArg::BinToHex => ConversionMode::BinaryToHex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    BinaryDecimal,
    DecimalHex,
    DecimalOctal,
    HexBinary,
    IpAddressing,
    Subnetting,
    Protocols,
    Mixed,
}

impl From<CategoryArg> for QuizCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::BinaryDecimal => QuizCategory::BinaryDecimal,
            CategoryArg::DecimalHex => QuizCategory::DecimalHex,
            CategoryArg::DecimalOctal => QuizCategory::DecimalOctal,
            CategoryArg::HexBinary => QuizCategory::HexBinary,
            CategoryArg::IpAddressing => QuizCategory::IpAddressing,
            CategoryArg::Subnetting => QuizCategory::Subnetting,
            CategoryArg::Protocols => QuizCategory::Protocols,
            CategoryArg::Mixed => QuizCategory::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}
