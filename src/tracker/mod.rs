//! Time-tracking core for the timekeeper.
//!
//! This module contains the state machine shared by both modes:
//! - `ticker`: Cancellable periodic task driving display refresh
//! - `engine`: `TimeTracker` with mode switching and start/pause/stop/reset
//! - `error`: Errors surfaced by tracker operations

pub mod engine;
pub mod error;
pub mod ticker;

pub use engine::{TimeTracker, TrackerEvent, COUNTDOWN_CUE_SECONDS};
pub use error::TrackerError;
pub use ticker::Ticker;
