//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which plays cue files with
//! rodio v0.20 and synthesizes sine beeps when no file is available.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::cue::{SoundCue, Tone};
use super::error::SoundError;

/// Volume applied to cue files.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Gain applied to synthesized tones.
const TONE_GAIN: f32 = 0.3;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Directory holding cue files, if any.
    sound_dir: Option<PathBuf>,
    /// Volume for cue files (0.0-1.0).
    volume: f32,
}

impl RodioSoundPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NoOutput` if no audio output device is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| SoundError::NoOutput(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sound_dir: None,
            volume: DEFAULT_VOLUME,
        })
    }

    /// Sets the directory cue files are loaded from.
    #[must_use]
    pub fn with_sound_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.sound_dir = dir;
        self
    }

    /// Sets the volume for cue files.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Plays a cue.
    ///
    /// The cue file is used when present; otherwise, or if the file cannot
    /// be decoded, the cue's tone pattern is synthesized.
    pub fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        if let Some(path) = self.sound_dir.as_deref().and_then(|dir| cue.file_in(dir)) {
            debug!("Playing cue file: {}", path.display());
            match self.play_file(&path) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_cue_file_error() => {
                    warn!(
                        "Failed to play '{}': {}, falling back to tone",
                        path.display(),
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        for scheduled in cue.tone_pattern() {
            self.play_tone(scheduled.tone, scheduled.offset())?;
        }
        Ok(())
    }

    /// Plays a single beep immediately.
    pub fn beep(&self, tone: Tone) -> Result<(), SoundError> {
        self.play_tone(tone, Duration::ZERO)
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path).map_err(|e| SoundError::unreadable(path, e))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SoundError::undecodable(path, e))?;

        let sink = self.new_sink()?;
        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        Ok(())
    }

    /// Synthesizes a sine beep with a fade-out, starting after `delay`.
    fn play_tone(&self, tone: Tone, delay: Duration) -> Result<(), SoundError> {
        let mut wave = SineWave::new(tone.frequency_hz as f32).take_duration(tone.duration());
        wave.set_filter_fadeout();

        let sink = self.new_sink()?;
        sink.append(wave.amplify(TONE_GAIN).delay(delay));
        sink.detach();

        debug!(
            "Tone {}Hz/{}ms scheduled after {:?}",
            tone.frequency_hz, tone.duration_ms, delay
        );
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::Sink(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("sound_dir", &self.sound_dir)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// Muting is decided by the caller, which simply does not create a player.
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(sound_dir: Option<PathBuf>, volume: f32) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player.with_sound_dir(sound_dir).with_volume(volume)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
