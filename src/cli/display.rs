//! Terminal rendering for the timekeeper.
//!
//! This module provides:
//! - Window title mirroring
//! - Panel layout (normal and fullscreen) as plain lines
//! - The raw-mode alternate screen guard
//! - One-shot messages printed outside the screen (errors, summary)

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::tracker::TimeTracker;
use crate::types::{Mode, RunState, TimerSettings};

const DISMISS_HINT: &str = "(任意のキーで閉じる)";

const SHORTCUT_HINT: &str =
    "[Space] 開始/一時停止  [Esc] 停止  [R] リセット  [F] 全画面  [P] 精度  [Q] 終了";

const INPUT_HINT: &str = "[↑↓] 分  [←→] 秒  [1-9] プリセット  [Enter] 開始";

// ============================================================================
// View
// ============================================================================

/// Snapshot of everything the screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub mode: Mode,
    pub run_state: RunState,
    /// Formatted time for the active mode
    pub display: String,
    pub settings: TimerSettings,
    pub show_tenths: bool,
    /// Countdown is in its final seconds
    pub warning: bool,
    pub fullscreen: bool,
    /// Open alert text, if any
    pub alert: Option<String>,
}

impl View {
    /// Captures the tracker state for drawing.
    pub fn from_tracker(tracker: &TimeTracker, fullscreen: bool, alert: Option<&str>) -> Self {
        Self {
            mode: tracker.mode(),
            run_state: tracker.run_state(),
            display: tracker.display(),
            settings: tracker.settings(),
            show_tenths: tracker.show_tenths(),
            warning: tracker.is_warning(),
            fullscreen,
            alert: alert.map(str::to_string),
        }
    }

    fn inputs_editable(&self) -> bool {
        self.mode == Mode::Timer && self.run_state != RunState::Running
    }
}

/// Returns the terminal window title.
///
/// While counting or paused the formatted time is prefixed to `base`.
pub fn window_title(tracker: &TimeTracker, base: &str) -> String {
    match tracker.run_state() {
        RunState::Running | RunState::Paused => format!("{} - {}", tracker.display(), base),
        RunState::Stopped => base.to_string(),
    }
}

// ============================================================================
// Layout
// ============================================================================

/// How a line is styled when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Text,
    Time,
    Warning,
    Hint,
    Alert,
}

/// One line of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Text, "")
    }
}

/// Lays out the panel for `view`.
pub fn panel_lines(view: &View) -> Vec<Line> {
    let time_kind = if view.warning {
        LineKind::Warning
    } else {
        LineKind::Time
    };

    let mut lines = Vec::new();

    if view.fullscreen {
        lines.push(Line::new(time_kind, view.display.clone()));
        lines.push(Line::blank());
        lines.push(Line::new(LineKind::Hint, "[F] 全画面を終了"));
    } else {
        lines.push(Line::new(LineKind::Heading, view.mode.heading()));
        lines.push(Line::new(LineKind::Text, mode_tabs(view.mode)));
        lines.push(Line::blank());

        match view.mode {
            Mode::Timer => {
                lines.push(Line::new(
                    LineKind::Text,
                    format!(
                        "分: {:>3}   秒: {:>2}",
                        view.settings.minutes, view.settings.seconds
                    ),
                ));
                if view.inputs_editable() {
                    lines.push(Line::new(LineKind::Hint, INPUT_HINT));
                }
            }
            Mode::Stopwatch => {
                let precision = if view.show_tenths { "1/10秒" } else { "秒" };
                lines.push(Line::new(LineKind::Text, format!("表示: {}", precision)));
            }
        }

        lines.push(Line::blank());
        lines.push(Line::new(time_kind, view.display.clone()));
        lines.push(Line::new(
            LineKind::Text,
            format!("状態: {}", view.run_state.label()),
        ));
        lines.push(Line::blank());
        lines.push(Line::new(LineKind::Hint, SHORTCUT_HINT));
    }

    if let Some(alert) = &view.alert {
        lines.push(Line::blank());
        lines.extend(alert_lines(alert));
    }

    lines
}

fn mode_tabs(active: Mode) -> String {
    let tab = |mode: Mode, key: char, name: &str| {
        let marker = if mode == active { '▶' } else { ' ' };
        format!("{}[{}] {}", marker, key, name)
    };
    format!(
        "{}  {}",
        tab(Mode::Timer, 'T', "タイマー"),
        tab(Mode::Stopwatch, 'S', "ストップウォッチ")
    )
}

fn alert_lines(alert: &str) -> Vec<Line> {
    let body: Vec<&str> = alert.lines().filter(|l| !l.trim().is_empty()).collect();
    let width = body
        .iter()
        .map(|l| display_width(l))
        .chain(std::iter::once(display_width(DISMISS_HINT)))
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::new(
        LineKind::Alert,
        format!("┌{}┐", "─".repeat(width + 2)),
    )];
    for text in body.iter().copied().chain(std::iter::once(DISMISS_HINT)) {
        let pad = width - display_width(text);
        lines.push(Line::new(
            LineKind::Alert,
            format!("│ {}{} │", text, " ".repeat(pad)),
        ));
    }
    lines.push(Line::new(
        LineKind::Alert,
        format!("└{}┘", "─".repeat(width + 2)),
    ));
    lines
}

/// Terminal column width; wide (CJK, emoji) characters take two cells.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

// ============================================================================
// Screen
// ============================================================================

/// Owns the terminal while the app runs.
///
/// Entering switches to raw mode and the alternate screen; dropping the
/// guard restores the terminal even on early return.
pub struct Screen<W: Write> {
    out: W,
    raw: bool,
    last_title: Option<String>,
}

impl Screen<Stdout> {
    /// Takes over stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched to raw mode.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut screen = Self {
            out: io::stdout(),
            raw: true,
            last_title: None,
        };
        crossterm::execute!(screen.out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(screen)
    }
}

impl<W: Write> Screen<W> {
    /// Wraps a writer without touching terminal modes.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            raw: false,
            last_title: None,
        }
    }

    /// Redraws the whole panel and updates the window title if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw(&mut self, view: &View, title: &str) -> io::Result<()> {
        if self.last_title.as_deref() != Some(title) {
            queue!(self.out, terminal::SetTitle(title))?;
            self.last_title = Some(title.to_string());
        }

        queue!(self.out, terminal::Clear(ClearType::All))?;

        let lines = panel_lines(view);
        let (columns, rows) = if self.raw {
            terminal::size().unwrap_or((80, 24))
        } else {
            (80, 24)
        };
        let top = if view.fullscreen {
            rows.saturating_sub(lines.len() as u16) / 2
        } else {
            1
        };

        for (index, line) in lines.iter().enumerate() {
            let column = if view.fullscreen {
                (columns as usize).saturating_sub(display_width(&line.text)) as u16 / 2
            } else {
                2
            };
            queue!(self.out, cursor::MoveTo(column, top + index as u16))?;
            self.print_line(line)?;
        }

        self.out.flush()
    }

    fn print_line(&mut self, line: &Line) -> io::Result<()> {
        match line.kind {
            LineKind::Heading | LineKind::Time => {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            LineKind::Warning => {
                queue!(
                    self.out,
                    SetAttribute(Attribute::Bold),
                    SetForegroundColor(Color::Red)
                )?;
            }
            LineKind::Hint => queue!(self.out, SetForegroundColor(Color::DarkGrey))?,
            LineKind::Alert => queue!(self.out, SetForegroundColor(Color::Yellow))?,
            LineKind::Text => {}
        }
        queue!(
            self.out,
            Print(&line.text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }

    /// Restores the terminal. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal modes cannot be restored.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        crossterm::execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ============================================================================
// Display
// ============================================================================

/// Messages printed outside the interactive screen.
pub struct Display;

impl Display {
    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows where the session ended.
    pub fn show_summary(mode: Mode, display: &str) {
        println!("{}: {}", mode.heading(), display);
    }
}

// ============================================================================
// Tests
// ============================================================================
