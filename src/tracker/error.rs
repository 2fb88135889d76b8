//! Tracker error types.

use thiserror::Error;

/// Errors returned by tracker operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// The timer was started with a total duration of zero.
    #[error("⚠️ 時間を設定してください")]
    InvalidDuration,
}

impl TrackerError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDuration => "↑↓で分、←→で秒を設定するか、数字キーでプリセットを選んでください",
        }
    }
}
