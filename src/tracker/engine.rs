//! Time tracker engine.
//!
//! This module provides the state machine behind both modes:
//! - Mode switching (Timer ↔ Stopwatch)
//! - Start/pause/stop/reset transitions
//! - Countdown and count-up driven by a cancellable `Ticker`
//! - Event firing for sounds, notifications and display refresh

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::error::TrackerError;
use super::ticker::Ticker;
use crate::types::{format_stopwatch, format_timer, Mode, RunState, TimerSettings};

/// Remaining seconds at which the countdown emits an audible cue.
pub const COUNTDOWN_CUE_SECONDS: [u32; 3] = [30, 10, 5];

/// Remaining seconds at or below which a running countdown is shown as a warning.
pub const WARNING_THRESHOLD_SECONDS: u32 = 30;

const TIMER_PERIOD: Duration = Duration::from_secs(1);
const STOPWATCH_PERIOD: Duration = Duration::from_millis(1000);
const STOPWATCH_TENTHS_PERIOD: Duration = Duration::from_millis(100);

// ============================================================================
// TrackerEvent
// ============================================================================

/// Tracker events for sounds, notifications and display refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Active mode changed (any running count was cancelled silently)
    ModeSwitched {
        /// Newly active mode
        mode: Mode,
    },
    /// Timer duration inputs changed
    Configured {
        /// New settings
        settings: TimerSettings,
    },
    /// Counting started from the initial value
    Started {
        /// Mode that started
        mode: Mode,
    },
    /// Counting resumed after a pause
    Resumed {
        /// Mode that resumed
        mode: Mode,
    },
    /// Counting paused
    Paused {
        /// Mode that paused
        mode: Mode,
    },
    /// Counting stopped
    Stopped {
        /// Mode that stopped
        mode: Mode,
    },
    /// Values zeroed
    Reset {
        /// Mode that was reset
        mode: Mode,
    },
    /// Stopwatch display precision changed
    PrecisionChanged {
        /// Whether tenths are shown
        show_tenths: bool,
    },
    /// Countdown advanced by one second
    TimerTick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Stopwatch display refreshed
    StopwatchTick {
        /// Elapsed milliseconds
        elapsed_ms: u64,
    },
    /// Countdown reached one of the cue points
    CountdownCue {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Completed,
}

// ============================================================================
// TimeTracker
// ============================================================================

/// Owned time-tracking state machine.
///
/// Exactly one instance is built at startup and handed to the event loop.
/// The ticker is live iff the run state is `Running`.
pub struct TimeTracker {
    mode: Mode,
    run_state: RunState,
    /// Configured countdown duration
    settings: TimerSettings,
    remaining_seconds: u32,
    elapsed_ms: u64,
    show_tenths: bool,
    /// Elapsed total when the stopwatch was last (re)started
    elapsed_base_ms: u64,
    resumed_at: Option<Instant>,
    ticker: Ticker,
    event_tx: mpsc::UnboundedSender<TrackerEvent>,
}

impl TimeTracker {
    /// Creates a stopped tracker in timer mode.
    pub fn new(
        settings: TimerSettings,
        show_tenths: bool,
        event_tx: mpsc::UnboundedSender<TrackerEvent>,
    ) -> Self {
        Self {
            mode: Mode::Timer,
            run_state: RunState::Stopped,
            settings,
            remaining_seconds: settings.total_seconds(),
            elapsed_ms: 0,
            show_tenths,
            elapsed_base_ms: 0,
            resumed_at: None,
            ticker: Ticker::idle(),
            event_tx,
        }
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Switches the active mode.
    ///
    /// Any running count is cancelled without a stop event, both accumulated
    /// values are cleared, and switching to the timer clears its duration inputs.
    pub fn switch_mode(&mut self, target: Mode) {
        self.ticker.cancel();
        self.run_state = RunState::Stopped;
        self.resumed_at = None;
        self.remaining_seconds = 0;
        self.elapsed_ms = 0;
        self.elapsed_base_ms = 0;
        if target == Mode::Timer {
            self.settings = TimerSettings::default();
        }
        self.mode = target;

        debug!("Switched to {} mode", target.as_str());
        self.emit(TrackerEvent::ModeSwitched { mode: target });
    }

    /// Sets the countdown duration.
    ///
    /// Only applies while stopped. Returns true if the settings were applied.
    pub fn configure_timer(&mut self, settings: TimerSettings) -> bool {
        if self.run_state != RunState::Stopped {
            debug!(
                "Ignoring timer configuration while {}",
                self.run_state.as_str()
            );
            return false;
        }

        self.settings = settings;
        self.remaining_seconds = settings.total_seconds();
        self.emit(TrackerEvent::Configured { settings });
        true
    }

    /// Shifts the minutes input by `delta`.
    pub fn adjust_minutes(&mut self, delta: i32) -> bool {
        self.configure_timer(self.settings.with_minutes_delta(delta))
    }

    /// Shifts the seconds input by `delta`.
    pub fn adjust_seconds(&mut self, delta: i32) -> bool {
        self.configure_timer(self.settings.with_seconds_delta(delta))
    }

    /// Starts or resumes counting in the active mode.
    ///
    /// Calling this while running does nothing.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidDuration` if the timer would start with
    /// zero seconds. No state is changed in that case.
    pub fn start(&mut self) -> Result<(), TrackerError> {
        if self.run_state == RunState::Running {
            return Ok(());
        }

        let resuming = self.run_state == RunState::Paused;

        match self.mode {
            Mode::Timer => {
                let remaining = if resuming {
                    self.remaining_seconds
                } else {
                    self.settings.total_seconds()
                };
                if remaining == 0 {
                    warn!("Timer start rejected: duration is zero");
                    return Err(TrackerError::InvalidDuration);
                }
                self.remaining_seconds = remaining;
                self.ticker = Ticker::start(TIMER_PERIOD);
            }
            Mode::Stopwatch => {
                if !resuming {
                    self.elapsed_ms = 0;
                }
                self.elapsed_base_ms = self.elapsed_ms;
                self.resumed_at = Some(Instant::now());
                self.ticker = Ticker::start(self.stopwatch_period());
            }
        }

        self.run_state = RunState::Running;

        if resuming {
            info!("Resumed {}", self.mode.as_str());
            self.emit(TrackerEvent::Resumed { mode: self.mode });
        } else {
            info!("Started {}", self.mode.as_str());
            self.emit(TrackerEvent::Started { mode: self.mode });
        }
        Ok(())
    }

    /// Pauses counting. Does nothing unless running.
    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }

        self.sync_elapsed();
        self.ticker.cancel();
        self.resumed_at = None;
        self.run_state = RunState::Paused;

        info!("Paused {}", self.mode.as_str());
        self.emit(TrackerEvent::Paused { mode: self.mode });
    }

    /// Pauses when running, otherwise starts or resumes.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`TimeTracker::start`].
    pub fn toggle_running(&mut self) -> Result<(), TrackerError> {
        if self.run_state == RunState::Running {
            self.pause();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Stops counting.
    ///
    /// The timer's remaining seconds drop to zero; the stopwatch keeps its
    /// elapsed time until reset. Does nothing when already stopped.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Stopped {
            return;
        }

        self.sync_elapsed();
        self.ticker.cancel();
        self.resumed_at = None;
        if self.mode == Mode::Timer {
            self.remaining_seconds = 0;
        }
        self.run_state = RunState::Stopped;

        info!("Stopped {}", self.mode.as_str());
        self.emit(TrackerEvent::Stopped { mode: self.mode });
    }

    /// Stops counting and zeroes the active mode's values.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.resumed_at = None;
        self.run_state = RunState::Stopped;

        match self.mode {
            Mode::Timer => {
                self.remaining_seconds = 0;
                self.settings = TimerSettings::default();
            }
            Mode::Stopwatch => {
                self.elapsed_ms = 0;
                self.elapsed_base_ms = 0;
            }
        }

        info!("Reset {}", self.mode.as_str());
        self.emit(TrackerEvent::Reset { mode: self.mode });
    }

    /// Shows or hides tenths on the stopwatch display.
    ///
    /// A running stopwatch switches to the new refresh cadence immediately.
    pub fn set_precision(&mut self, show_tenths: bool) {
        if self.show_tenths == show_tenths {
            return;
        }
        self.show_tenths = show_tenths;

        if self.mode == Mode::Stopwatch && self.run_state == RunState::Running {
            self.sync_elapsed();
            self.elapsed_base_ms = self.elapsed_ms;
            self.resumed_at = Some(Instant::now());
            self.ticker = Ticker::start(self.stopwatch_period());
            debug!("Stopwatch cadence now {:?}", self.stopwatch_period());
        }

        self.emit(TrackerEvent::PrecisionChanged { show_tenths });
    }

    /// Flips the tenths display.
    pub fn toggle_precision(&mut self) {
        self.set_precision(!self.show_tenths);
    }

    // ------------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------------

    /// Waits for the next tick. Never resolves unless running.
    pub async fn wait_tick(&mut self) {
        self.ticker.tick().await;
    }

    /// Advances the active mode by one tick.
    pub fn on_tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }

        match self.mode {
            Mode::Timer => self.timer_tick(),
            Mode::Stopwatch => {
                self.sync_elapsed();
                self.emit(TrackerEvent::StopwatchTick {
                    elapsed_ms: self.elapsed_ms,
                });
            }
        }
    }

    fn timer_tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.emit(TrackerEvent::TimerTick {
            remaining_seconds: self.remaining_seconds,
        });

        if COUNTDOWN_CUE_SECONDS.contains(&self.remaining_seconds) {
            self.emit(TrackerEvent::CountdownCue {
                remaining_seconds: self.remaining_seconds,
            });
        }

        if self.remaining_seconds == 0 {
            self.ticker.cancel();
            self.run_state = RunState::Stopped;
            info!("Timer completed");
            self.emit(TrackerEvent::Completed);
        }
    }

    fn sync_elapsed(&mut self) {
        if self.mode != Mode::Stopwatch {
            return;
        }
        if let Some(resumed_at) = self.resumed_at {
            self.elapsed_ms = self.elapsed_base_ms + resumed_at.elapsed().as_millis() as u64;
        }
    }

    fn stopwatch_period(&self) -> Duration {
        if self.show_tenths {
            STOPWATCH_TENTHS_PERIOD
        } else {
            STOPWATCH_PERIOD
        }
    }

    fn emit(&self, event: TrackerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Tracker event receiver dropped");
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the run state of the active mode.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns true while counting.
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Returns the configured countdown duration.
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Returns the countdown's remaining seconds.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns the stopwatch's elapsed milliseconds as of the last refresh.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Returns true if the stopwatch shows tenths.
    pub fn show_tenths(&self) -> bool {
        self.show_tenths
    }

    /// Returns true if a ticker is scheduled.
    pub fn has_live_ticker(&self) -> bool {
        self.ticker.is_active()
    }

    /// Returns the live ticker's period.
    pub fn tick_period(&self) -> Option<Duration> {
        self.ticker.period()
    }

    /// Returns true if the countdown display should be highlighted.
    pub fn is_warning(&self) -> bool {
        self.mode == Mode::Timer
            && self.run_state == RunState::Running
            && self.remaining_seconds > 0
            && self.remaining_seconds <= WARNING_THRESHOLD_SECONDS
    }

    /// Returns the formatted display for the active mode.
    pub fn display(&self) -> String {
        match self.mode {
            Mode::Timer => format_timer(self.remaining_seconds),
            Mode::Stopwatch => format_stopwatch(self.elapsed_ms, self.show_tenths),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
