//! Keyboard input mapping.
//!
//! Converts crossterm key events into [`Action`]s for the app.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Mode;

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Space: start when idle, pause when running
    ToggleRun,
    /// Enter on the duration inputs
    Start,
    /// Escape
    Stop,
    /// R
    Reset,
    /// F
    ToggleFullscreen,
    /// T / S
    SwitchMode(Mode),
    /// Up / Down on the duration inputs
    AdjustMinutes(i32),
    /// Right / Left on the duration inputs
    AdjustSeconds(i32),
    /// P
    TogglePrecision,
    /// Digit 1-9 on the duration inputs
    Preset(usize),
    /// Any key while an alert is shown
    DismissAlert,
    /// Q / Ctrl-C
    Quit,
}

/// State that changes how keys are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputContext {
    /// An alert is waiting to be dismissed
    pub alert_open: bool,
    /// The timer's duration inputs accept edits (timer mode, not running)
    pub inputs_editable: bool,
}

/// Converts a key event into an action.
pub fn translate_key_event(context: InputContext, key_event: KeyEvent) -> Option<Action> {
    // Some platforms also report key releases; only presses and repeats count.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
        return Some(Action::Quit);
    }

    if context.alert_open {
        return Some(Action::DismissAlert);
    }

    match key_event.code {
        KeyCode::Char(' ') => Some(Action::ToggleRun),
        KeyCode::Esc => Some(Action::Stop),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleFullscreen),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::SwitchMode(Mode::Timer)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::SwitchMode(Mode::Stopwatch)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePrecision),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        // Duration inputs
        KeyCode::Enter if context.inputs_editable => Some(Action::Start),
        KeyCode::Up if context.inputs_editable => Some(Action::AdjustMinutes(1)),
        KeyCode::Down if context.inputs_editable => Some(Action::AdjustMinutes(-1)),
        KeyCode::Right if context.inputs_editable => Some(Action::AdjustSeconds(1)),
        KeyCode::Left if context.inputs_editable => Some(Action::AdjustSeconds(-1)),
        KeyCode::Char(c @ '1'..='9') if context.inputs_editable => {
            c.to_digit(10).map(|d| Action::Preset(d as usize))
        }
        _ => None,
    }
}
