//! Sound system error types.
//!
//! None of these ever reaches the time tracker; callers log them and move on.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while playing cues and beeps.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output could be opened.
    #[error("オーディオ出力を開けません: {0}")]
    NoOutput(String),

    /// A cue file exists in the sound directory but could not be opened.
    #[error("キューファイルを開けません: {}: {reason}", path.display())]
    CueFileUnreadable { path: PathBuf, reason: String },

    /// A cue file was opened but is not a supported audio format.
    #[error("キューファイルをデコードできません: {}: {reason}", path.display())]
    CueFileUndecodable { path: PathBuf, reason: String },

    /// A playback sink could not be attached to the output.
    #[error("再生シンクを作成できません: {0}")]
    Sink(String),
}

impl SoundError {
    pub(crate) fn unreadable(path: &Path, reason: impl ToString) -> Self {
        Self::CueFileUnreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn undecodable(path: &Path, reason: impl ToString) -> Self {
        Self::CueFileUndecodable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the cue file was at fault, so the synthesized tone
    /// pattern can be played instead.
    #[must_use]
    pub fn is_cue_file_error(&self) -> bool {
        matches!(
            self,
            Self::CueFileUnreadable { .. } | Self::CueFileUndecodable { .. }
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoOutput(_) => "オーディオデバイスを接続するか --no-sound を指定してください",
            Self::CueFileUnreadable { .. } => "sound_dir の権限を確認してください",
            Self::CueFileUndecodable { .. } => "WAV / MP3 / OGG / FLAC のいずれかに変換してください",
            Self::Sink(_) => "オーディオ設定を確認してください",
        }
    }
}
