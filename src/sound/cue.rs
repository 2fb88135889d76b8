//! Sound cues and synthesized tones.
//!
//! Every cue can be played from a file in the configured sound directory.
//! When no file is available, its tone pattern is synthesized instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Discrete sound effects played on user actions and timer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Generic button press (pause, stop, mode switch, ...)
    Button,
    /// Counting started or resumed
    Start,
    /// Values reset
    Reset,
    /// Countdown finished
    Complete,
    /// Invalid input
    Alert,
}

impl SoundCue {
    /// All cues, in a stable order.
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Button,
        SoundCue::Start,
        SoundCue::Reset,
        SoundCue::Complete,
        SoundCue::Alert,
    ];

    /// File name looked up in the sound directory.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Button => "set.mp3",
            SoundCue::Start => "right.mp3",
            SoundCue::Reset => "reset.mp3",
            SoundCue::Complete => "seikai.mp3",
            SoundCue::Alert => "alert.mp3",
        }
    }

    /// Returns the cue's file inside `dir`, if it exists.
    #[must_use]
    pub fn file_in(&self, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(self.file_name());
        path.is_file().then_some(path)
    }

    /// Tone pattern synthesized when no file is available.
    #[must_use]
    pub fn tone_pattern(&self) -> &'static [ScheduledTone] {
        match self {
            SoundCue::Button => &BUTTON_PATTERN,
            SoundCue::Start => &START_PATTERN,
            SoundCue::Reset => &RESET_PATTERN,
            SoundCue::Complete => &COMPLETE_PATTERN,
            SoundCue::Alert => &ALERT_PATTERN,
        }
    }
}

/// A sine beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency_hz: u32,
    /// Length in milliseconds
    pub duration_ms: u64,
}

impl Tone {
    /// Creates a tone.
    #[must_use]
    pub const fn new(frequency_hz: u32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Length of the tone.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for Tone {
    /// Countdown cue beep.
    fn default() -> Self {
        Self::new(600, 150)
    }
}

/// A tone played `offset_ms` after the pattern starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTone {
    /// Delay from the start of the pattern
    pub offset_ms: u64,
    /// Tone to play
    pub tone: Tone,
}

impl ScheduledTone {
    const fn at(offset_ms: u64, frequency_hz: u32, duration_ms: u64) -> Self {
        Self {
            offset_ms,
            tone: Tone::new(frequency_hz, duration_ms),
        }
    }

    /// Delay from the start of the pattern.
    #[must_use]
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}

const BUTTON_PATTERN: [ScheduledTone; 1] = [ScheduledTone::at(0, 1000, 60)];

const START_PATTERN: [ScheduledTone; 2] = [
    ScheduledTone::at(0, 880, 120),
    ScheduledTone::at(130, 1320, 120),
];

const RESET_PATTERN: [ScheduledTone; 2] = [
    ScheduledTone::at(0, 660, 100),
    ScheduledTone::at(110, 440, 150),
];

// Three beeps, the last one held longer.
const COMPLETE_PATTERN: [ScheduledTone; 3] = [
    ScheduledTone::at(0, 800, 300),
    ScheduledTone::at(400, 800, 300),
    ScheduledTone::at(800, 800, 500),
];

const ALERT_PATTERN: [ScheduledTone; 2] = [
    ScheduledTone::at(0, 400, 250),
    ScheduledTone::at(300, 400, 250),
];
