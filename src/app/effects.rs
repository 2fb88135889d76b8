//! Side effects for tracker events.
//!
//! Maps each [`TrackerEvent`] to sound cues, beeps and the completion
//! notification. Failures are logged and never reach the tracker.

use tracing::{debug, warn};

use crate::notification::{Notification, Notifier};
use crate::sound::{SoundCue, SoundPlayer, Tone};
use crate::tracker::{TrackerError, TrackerEvent};

/// Alert text shown when the countdown finishes.
pub const COMPLETION_ALERT: &str = "⏰ 時間です！\n\nタイマーが終了しました。";

/// Sound and notification outputs.
///
/// Either output may be absent (disabled or unavailable).
pub struct Effects<P: SoundPlayer, N: Notifier> {
    sound: Option<P>,
    notifier: Option<N>,
    beep: Tone,
}

impl<P: SoundPlayer, N: Notifier> Effects<P, N> {
    pub fn new(sound: Option<P>, notifier: Option<N>, beep: Tone) -> Self {
        Self {
            sound,
            notifier,
            beep,
        }
    }

    /// Returns the cue played for `event`, if any.
    ///
    /// Ticks are silent; countdown cues and completion are handled separately.
    pub fn cue_for(event: &TrackerEvent) -> Option<SoundCue> {
        match event {
            TrackerEvent::ModeSwitched { .. }
            | TrackerEvent::Configured { .. }
            | TrackerEvent::Paused { .. }
            | TrackerEvent::Stopped { .. }
            | TrackerEvent::PrecisionChanged { .. } => Some(SoundCue::Button),
            TrackerEvent::Started { .. } | TrackerEvent::Resumed { .. } => Some(SoundCue::Start),
            TrackerEvent::Reset { .. } => Some(SoundCue::Reset),
            TrackerEvent::Completed => Some(SoundCue::Complete),
            TrackerEvent::TimerTick { .. }
            | TrackerEvent::StopwatchTick { .. }
            | TrackerEvent::CountdownCue { .. } => None,
        }
    }

    /// Performs the effects of `event`.
    ///
    /// Returns alert text the user has to dismiss, if the event raises one.
    pub fn handle(&self, event: &TrackerEvent) -> Option<String> {
        match event {
            TrackerEvent::CountdownCue { remaining_seconds } => {
                debug!("Countdown cue at {}s", remaining_seconds);
                self.beep();
                None
            }
            TrackerEvent::Completed => {
                self.play(SoundCue::Complete);
                self.notify(&Notification::timer_complete());
                Some(COMPLETION_ALERT.to_string())
            }
            other => {
                if let Some(cue) = Self::cue_for(other) {
                    self.play(cue);
                }
                None
            }
        }
    }

    /// Plays the alert cue for a rejected operation and returns its alert text.
    pub fn rejected(&self, err: &TrackerError) -> String {
        debug!("Rejected: {} ({})", err, err.suggestion());
        self.play(SoundCue::Alert);
        err.to_string()
    }

    /// Plays the button cue.
    pub fn button(&self) {
        self.play(SoundCue::Button);
    }

    fn play(&self, cue: SoundCue) {
        let Some(sound) = &self.sound else {
            return;
        };
        if let Err(e) = sound.play_cue(cue) {
            warn!("Failed to play {:?} cue: {} ({})", cue, e, e.suggestion());
        }
    }

    fn beep(&self) {
        let Some(sound) = &self.sound else {
            return;
        };
        if let Err(e) = sound.beep(self.beep) {
            warn!("Failed to play beep: {} ({})", e, e.suggestion());
        }
    }

    fn notify(&self, notification: &Notification) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if !notifier.is_available() {
            debug!("Notifications unavailable, skipping");
            return;
        }
        if let Err(e) = notifier.notify(notification) {
            warn!("Failed to send notification: {} ({})", e, e.suggestion());
        }
    }
}
