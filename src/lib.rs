//! Timekeeper Library
//!
//! This library provides the core functionality for the timekeeper CLI.
//! It includes:
//! - Time tracker engine for the countdown timer and stopwatch
//! - Interactive app loop wiring keys, ticks and effects
//! - CLI command parsing, key mapping and screen layout
//! - Configuration file loading
//! - Sound cues and synthesized beeps
//! - Desktop notifications on completion

pub mod app;
pub mod cli;
pub mod config;
pub mod notification;
pub mod sound;
pub mod tracker;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{format_stopwatch, format_timer, Mode, RunState, TimerSettings};

pub use tracker::{TimeTracker, TrackerError, TrackerEvent};

pub use app::{App, Effects};

pub use config::{AppConfig, ConfigError};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundCue, SoundError, SoundPlayer, Tone};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotifier, Notification, NotificationError, Notifier,
};
