//! Interactive application.
//!
//! Owns the single [`TimeTracker`] and drives it from one event loop that
//! alternates between key presses and ticks:
//!
//! ```text
//! key event ──▶ Action ──▶ TimeTracker ──▶ TrackerEvent ──▶ Effects
//!                               ▲                              │
//! ticker ───────────────────────┘          alert text ◀───────┘
//! ```

pub mod effects;

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use effects::{Effects, COMPLETION_ALERT};

use crate::cli::{translate_key_event, window_title, Action, InputContext, Launch, Screen, View};
use crate::config::AppConfig;
use crate::notification::Notifier;
use crate::sound::SoundPlayer;
use crate::tracker::{TimeTracker, TrackerError, TrackerEvent};
use crate::types::{Mode, RunState};

/// Outcome of one wait in the event loop.
enum Step {
    Input(Option<io::Result<Event>>),
    Tick,
    Interrupt,
}

/// The timekeeper session.
pub struct App<P: SoundPlayer, N: Notifier> {
    tracker: TimeTracker,
    events: mpsc::UnboundedReceiver<TrackerEvent>,
    effects: Effects<P, N>,
    config: AppConfig,
    fullscreen: bool,
    alert: Option<String>,
    should_quit: bool,
}

impl<P: SoundPlayer, N: Notifier> App<P, N> {
    /// Builds the session from configuration.
    pub fn new(config: &AppConfig, sound: Option<P>, notifier: Option<N>) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let tracker = TimeTracker::new(config.timer, config.stopwatch.show_tenths, event_tx);

        Self {
            tracker,
            events,
            effects: Effects::new(sound, notifier, config.sound.beep_tone()),
            config: config.clone(),
            fullscreen: false,
            alert: None,
            should_quit: false,
        }
    }

    /// Puts the session in its launch state.
    ///
    /// Opening in a mode is silent; an immediate start behaves like a key press.
    pub fn prepare(&mut self, launch: Launch) {
        if launch.mode != self.tracker.mode() {
            self.tracker.switch_mode(launch.mode);
        }
        self.discard_events();

        if launch.start {
            self.handle_action(Action::Start);
        }
    }

    /// Applies a user action.
    pub fn handle_action(&mut self, action: Action) {
        debug!("Action: {:?}", action);

        match action {
            Action::ToggleRun => {
                if let Err(e) = self.tracker.toggle_running() {
                    self.reject(e);
                }
            }
            Action::Start => {
                if let Err(e) = self.tracker.start() {
                    self.reject(e);
                }
            }
            Action::Stop => self.tracker.stop(),
            Action::Reset => self.tracker.reset(),
            Action::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                self.effects.button();
            }
            Action::SwitchMode(mode) => self.tracker.switch_mode(mode),
            Action::AdjustMinutes(delta) => {
                self.tracker.adjust_minutes(delta);
            }
            Action::AdjustSeconds(delta) => {
                self.tracker.adjust_seconds(delta);
            }
            Action::TogglePrecision => self.tracker.toggle_precision(),
            Action::Preset(number) => match self.config.preset(number) {
                Some(settings) => {
                    self.tracker.configure_timer(settings);
                }
                None => debug!("No preset bound to {}", number),
            },
            Action::DismissAlert => self.alert = None,
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
        }

        self.process_events();
    }

    /// Waits for the tracker's next tick. Never resolves while not running.
    pub async fn wait_tick(&mut self) {
        self.tracker.wait_tick().await;
    }

    /// Advances the tracker by one tick and performs the resulting effects.
    pub fn on_tick(&mut self) {
        self.tracker.on_tick();
        self.process_events();
    }

    /// Performs the effects of every pending tracker event.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let Some(text) = self.effects.handle(&event) {
                self.alert = Some(text);
            }
        }
    }

    fn discard_events(&mut self) {
        while self.events.try_recv().is_ok() {}
    }

    fn reject(&mut self, err: TrackerError) {
        info!("{}", err);
        self.alert = Some(self.effects.rejected(&err));
    }

    /// Returns how keys should be read right now.
    pub fn input_context(&self) -> InputContext {
        InputContext {
            alert_open: self.alert.is_some(),
            inputs_editable: self.tracker.mode() == Mode::Timer
                && self.tracker.run_state() != RunState::Running,
        }
    }

    /// Returns the tracker.
    pub fn tracker(&self) -> &TimeTracker {
        &self.tracker
    }

    /// Returns the open alert text.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Returns true in the fullscreen layout.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current terminal window title.
    pub fn title(&self) -> String {
        window_title(&self.tracker, &self.config.title)
    }

    /// Snapshot for drawing.
    pub fn view(&self) -> View {
        View::from_tracker(&self.tracker, self.fullscreen, self.alert.as_deref())
    }

    /// Runs the interactive loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or reading from the terminal fails.
    pub async fn run<W: Write>(&mut self, screen: &mut Screen<W>) -> Result<()> {
        let mut reader = EventStream::new();
        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            screen
                .draw(&self.view(), &self.title())
                .context("画面の描画に失敗しました")?;

            if self.should_quit {
                break;
            }

            let step = tokio::select! {
                event = reader.next() => Step::Input(event),
                _ = self.tracker.wait_tick() => Step::Tick,
                _ = &mut ctrl_c => Step::Interrupt,
            };

            match step {
                Step::Input(Some(Ok(Event::Key(key)))) => {
                    if let Some(action) = translate_key_event(self.input_context(), key) {
                        self.handle_action(action);
                    }
                }
                // Resize and other events only need a redraw.
                Step::Input(Some(Ok(_))) => {}
                Step::Input(Some(Err(e))) => {
                    return Err(e).context("キー入力の読み取りに失敗しました");
                }
                Step::Input(None) => {
                    debug!("Input stream closed");
                    break;
                }
                Step::Tick => self.on_tick(),
                Step::Interrupt => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
