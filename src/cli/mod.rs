//! CLI module for the timekeeper.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Key event to action mapping
//! - `display`: Screen layout and output formatting

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, Launch, StopwatchArgs, TimerArgs};
pub use display::{panel_lines, window_title, Display, Screen, View};
pub use input::{translate_key_event, Action, InputContext};
