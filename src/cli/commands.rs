//! Command definitions for the timekeeper CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::types::{Mode, TimerSettings, MAX_MINUTES, MAX_SECONDS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Timekeeper - countdown timer and stopwatch for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "timekeeper",
    version,
    about = "ターミナルで使えるタイマー＆ストップウォッチ",
    long_about = "効果音・通知・キーボードショートカット・全画面表示に対応した\n\
                  カウントダウンタイマーとストップウォッチ。\n\n\
                  [Space] 開始/一時停止  [Esc] 停止  [R] リセット  [F] 全画面\n\
                  [T] タイマー  [S] ストップウォッチ  [P] 精度切替  [Q] 終了",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `timer`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the JSON config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable sound cues and beeps
    #[arg(long, global = true)]
    pub no_sound: bool,

    /// Disable the desktop notification on completion
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Write logs to this file (the screen is taken over while running)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open in countdown timer mode
    Timer(TimerArgs),

    /// Open in stopwatch mode
    Stopwatch(StopwatchArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for the timer command
#[derive(Args, Debug, Clone, Default)]
pub struct TimerArgs {
    /// Initial minutes (0-999)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(0..=MAX_MINUTES as i64)
    )]
    pub minutes: Option<u32>,

    /// Initial seconds (0-59)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(0..=MAX_SECONDS as i64)
    )]
    pub seconds: Option<u32>,

    /// Start counting immediately
    #[arg(long)]
    pub start: bool,
}

/// Arguments for the stopwatch command
#[derive(Args, Debug, Clone, Default)]
pub struct StopwatchArgs {
    /// Show tenths of a second
    #[arg(short, long)]
    pub tenths: bool,

    /// Start counting immediately
    #[arg(long)]
    pub start: bool,
}

// ============================================================================
// Launch
// ============================================================================

/// How the interactive session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launch {
    /// Initial mode
    pub mode: Mode,
    /// Whether counting starts right away
    pub start: bool,
}

impl Cli {
    /// Applies command line overrides to `config` and returns the launch mode.
    ///
    /// Returns None for commands that do not open the interactive session.
    pub fn apply_overrides(&self, config: &mut AppConfig) -> Option<Launch> {
        if self.no_sound {
            config.sound.enabled = false;
        }
        if self.no_notify {
            config.notifications = false;
        }

        match &self.command {
            None => Some(Launch {
                mode: Mode::Timer,
                start: false,
            }),
            Some(Commands::Timer(args)) => {
                if args.minutes.is_some() || args.seconds.is_some() {
                    config.timer = TimerSettings::new(
                        args.minutes.unwrap_or(0),
                        args.seconds.unwrap_or(0),
                    );
                }
                Some(Launch {
                    mode: Mode::Timer,
                    start: args.start,
                })
            }
            Some(Commands::Stopwatch(args)) => {
                if args.tenths {
                    config.stopwatch.show_tenths = true;
                }
                Some(Launch {
                    mode: Mode::Stopwatch,
                    start: args.start,
                })
            }
            Some(Commands::Completions { .. }) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
