//! Cancellable periodic task.
//!
//! A `Ticker` wraps a `tokio::time::Interval`. Cancelling drops the interval,
//! so no tick can be observed afterwards; awaiting a cancelled ticker never
//! resolves, which lets it sit in a `tokio::select!` branch unconditionally.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Handle to the single live periodic callback.
#[derive(Debug)]
pub struct Ticker {
    interval: Option<Interval>,
    period: Duration,
}

impl Ticker {
    /// Creates a ticker with nothing scheduled.
    pub fn idle() -> Self {
        Self {
            interval: None,
            period: Duration::ZERO,
        }
    }

    /// Starts a ticker whose first tick fires one `period` from now.
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval: Some(interval),
            period,
        }
    }

    /// Cancels the ticker. Calling this on an idle ticker does nothing.
    pub fn cancel(&mut self) {
        self.interval = None;
    }

    /// Returns true while ticks are scheduled.
    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Returns the tick period, if active.
    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(|_| self.period)
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::idle()
    }
}
