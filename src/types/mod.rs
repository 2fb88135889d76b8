//! Core data types for the timekeeper.
//!
//! This module defines the data structures used for:
//! - Mode and run-state tracking
//! - Timer duration settings with validation
//! - Time display formatting

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// Which tracking behavior is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Countdown from a configured duration
    Timer,
    /// Count up from zero
    Stopwatch,
}

impl Mode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Timer => "timer",
            Mode::Stopwatch => "stopwatch",
        }
    }

    /// Returns the heading shown above the display panel.
    pub fn heading(&self) -> &'static str {
        match self {
            Mode::Timer => "⏰ タイマー",
            Mode::Stopwatch => "⏱️ ストップウォッチ",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Timer
    }
}

// ============================================================================
// RunState
// ============================================================================

/// Stopped/Running/Paused status of the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not counting; values may be reloaded on the next start
    Stopped,
    /// Counting with a live ticker
    Running,
    /// Counting suspended; values are retained for resume
    Paused,
}

impl RunState {
    /// Returns the string representation of the run state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }

    /// Returns the user-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Stopped => "停止中",
            RunState::Running => "実行中",
            RunState::Paused => "一時停止中",
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Stopped
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Maximum minutes accepted by the duration inputs.
pub const MAX_MINUTES: u32 = 999;

/// Maximum seconds accepted by the duration inputs.
pub const MAX_SECONDS: u32 = 59;

/// Configured initial duration of the countdown timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Minutes input (0-999)
    #[serde(default)]
    pub minutes: u32,
    /// Seconds input (0-59)
    #[serde(default)]
    pub seconds: u32,
}

impl TimerSettings {
    /// Creates settings from minutes and seconds.
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Total configured duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    /// Returns a copy with minutes shifted by `delta`, clamped to the valid range.
    #[must_use]
    pub fn with_minutes_delta(self, delta: i32) -> Self {
        let minutes = (self.minutes as i64 + delta as i64).clamp(0, MAX_MINUTES as i64) as u32;
        Self { minutes, ..self }
    }

    /// Returns a copy with seconds shifted by `delta`, clamped to the valid range.
    #[must_use]
    pub fn with_seconds_delta(self, delta: i32) -> Self {
        let seconds = (self.seconds as i64 + delta as i64).clamp(0, MAX_SECONDS as i64) as u32;
        Self { seconds, ..self }
    }

    /// Validates the settings.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.minutes > MAX_MINUTES {
            return Err(format!("分は0-{}の範囲で指定してください", MAX_MINUTES));
        }
        if self.seconds > MAX_SECONDS {
            return Err(format!("秒は0-{}の範囲で指定してください", MAX_SECONDS));
        }
        Ok(())
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats remaining timer seconds as `MM分SS秒`.
pub fn format_timer(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}分{:02}秒", minutes, seconds)
}

/// Formats stopwatch elapsed milliseconds as `MM分SS秒` or `MM分SS.T秒`.
pub fn format_stopwatch(elapsed_ms: u64, show_tenths: bool) -> String {
    let minutes = elapsed_ms / 60_000;
    let seconds = (elapsed_ms % 60_000) / 1000;
    if show_tenths {
        let tenths = (elapsed_ms % 1000) / 100;
        format!("{:02}分{:02}.{}秒", minutes, seconds, tenths)
    } else {
        format!("{:02}分{:02}秒", minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Mode / RunState Tests
    // ------------------------------------------------------------------------

    mod mode_tests {
        use super::*;

        #[test]
        fn test_default_is_timer() {
            assert_eq!(Mode::default(), Mode::Timer);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(Mode::Timer.as_str(), "timer");
            assert_eq!(Mode::Stopwatch.as_str(), "stopwatch");
        }

        #[test]
        fn test_serialize_deserialize() {
            let json = serde_json::to_string(&Mode::Stopwatch).unwrap();
            assert_eq!(json, "\"stopwatch\"");

            let mode: Mode = serde_json::from_str("\"timer\"").unwrap();
            assert_eq!(mode, Mode::Timer);
        }

        #[test]
        fn test_run_state_default_is_stopped() {
            assert_eq!(RunState::default(), RunState::Stopped);
        }

        #[test]
        fn test_run_state_labels() {
            assert_eq!(RunState::Stopped.label(), "停止中");
            assert_eq!(RunState::Running.label(), "実行中");
            assert_eq!(RunState::Paused.label(), "一時停止中");
        }
    }

    // ------------------------------------------------------------------------
    // TimerSettings Tests
    // ------------------------------------------------------------------------

    mod timer_settings_tests {
        use super::*;

        #[test]
        fn test_total_seconds() {
            assert_eq!(TimerSettings::new(0, 0).total_seconds(), 0);
            assert_eq!(TimerSettings::new(0, 5).total_seconds(), 5);
            assert_eq!(TimerSettings::new(3, 30).total_seconds(), 210);
        }

        #[test]
        fn test_minutes_delta_clamps() {
            let settings = TimerSettings::new(0, 10);
            assert_eq!(settings.with_minutes_delta(-1), TimerSettings::new(0, 10));
            assert_eq!(settings.with_minutes_delta(2), TimerSettings::new(2, 10));

            let max = TimerSettings::new(MAX_MINUTES, 0);
            assert_eq!(max.with_minutes_delta(1).minutes, MAX_MINUTES);
        }

        #[test]
        fn test_seconds_delta_clamps() {
            let settings = TimerSettings::new(1, 58);
            assert_eq!(settings.with_seconds_delta(5).seconds, 59);
            assert_eq!(settings.with_seconds_delta(-60).seconds, 0);
        }

        #[test]
        fn test_validate() {
            assert!(TimerSettings::new(25, 0).validate().is_ok());
            assert!(TimerSettings::new(0, 60).validate().is_err());
            assert!(TimerSettings::new(1000, 0).validate().is_err());
        }

        #[test]
        fn test_deserialize_missing_fields() {
            let settings: TimerSettings = serde_json::from_str(r#"{"minutes": 3}"#).unwrap();
            assert_eq!(settings, TimerSettings::new(3, 0));
        }
    }

    // ------------------------------------------------------------------------
    // Formatting Tests
    // ------------------------------------------------------------------------

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_timer() {
            assert_eq!(format_timer(0), "00分00秒");
            assert_eq!(format_timer(5), "00分05秒");
            assert_eq!(format_timer(90), "01分30秒");
            assert_eq!(format_timer(125 * 60 + 9), "125分09秒");
        }

        #[test]
        fn test_format_stopwatch_whole_seconds() {
            assert_eq!(format_stopwatch(0, false), "00分00秒");
            assert_eq!(format_stopwatch(1_999, false), "00分01秒");
            assert_eq!(format_stopwatch(61_500, false), "01分01秒");
        }

        #[test]
        fn test_format_stopwatch_tenths() {
            assert_eq!(format_stopwatch(0, true), "00分00.0秒");
            assert_eq!(format_stopwatch(1_550, true), "00分01.5秒");
            assert_eq!(format_stopwatch(600_099, true), "10分00.0秒");
        }
    }
}
