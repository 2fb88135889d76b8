//! Sound playback system for the timekeeper.
//!
//! This module provides audio feedback for user actions and timer events:
//!
//! - Discrete cues (button, start, reset, complete, alert)
//! - Synthesized sine beeps for the countdown cue points
//! - Non-blocking audio playback
//! - Errors that are logged by the caller, never fatal
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │    SoundCue      │────▶│  Cue file        │
//! │                  │     │  (sound_dir)     │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Tone pattern    │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use timekeeper::sound::{RodioSoundPlayer, SoundCue, Tone};
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play_cue(SoundCue::Start).expect("playback failed");
//! player.beep(Tone::new(600, 150)).expect("playback failed");
//! ```

mod cue;
mod error;
mod player;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use cue::{ScheduledTone, SoundCue, Tone};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer, DEFAULT_VOLUME};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a cue. Should be non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError>;

    /// Plays a single beep. Should be non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn beep(&self, tone: Tone) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        RodioSoundPlayer::play_cue(self, cue)
    }

    fn beep(&self, tone: Tone) -> Result<(), SoundError> {
        RodioSoundPlayer::beep(self, tone)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        (**self).play_cue(cue)
    }

    fn beep(&self, tone: Tone) -> Result<(), SoundError> {
        (**self).beep(tone)
    }
}

/// A recorded playback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// A cue was played
    Cue(SoundCue),
    /// A beep was played
    Beep(Tone),
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    plays: Mutex<Vec<Playback>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_plays(&self) -> Vec<Playback> {
        self.plays.lock().unwrap().clone()
    }

    /// Returns how many times `cue` was played.
    #[must_use]
    pub fn cue_count(&self, cue: SoundCue) -> usize {
        self.plays
            .lock()
            .unwrap()
            .iter()
            .filter(|p| **p == Playback::Cue(cue))
            .count()
    }

    pub fn clear_calls(&self) {
        self.plays.lock().unwrap().clear();
    }

    fn record(&self, playback: Playback) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::Sink("Mock failure".to_string()));
        }
        self.plays.lock().unwrap().push(playback);
        Ok(())
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        self.record(Playback::Cue(cue))
    }

    fn beep(&self, tone: Tone) -> Result<(), SoundError> {
        self.record(Playback::Beep(tone))
    }
}
