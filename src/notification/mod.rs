//! Desktop notification integration.
//!
//! When the countdown reaches zero the timekeeper shows a system
//! notification in addition to the in-terminal alert. Delivery goes through
//! the platform notification command (see [`desktop`]); failures are logged
//! and never interrupt the timer.
//!
//! # Example
//!
//! ```rust,no_run
//! use timekeeper::notification::{DesktopNotifier, Notification, Notifier};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let notifier = DesktopNotifier::new();
//! if let Err(e) = notifier.notify(&Notification::timer_complete()) {
//!     eprintln!("notification failed: {}", e);
//! }
//! # }
//! ```

pub mod desktop;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use desktop::DesktopNotifier;
pub use error::NotificationError;

/// Title and body of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line
    pub title: String,
    /// Body text
    pub body: String,
}

impl Notification {
    /// Creates a notification.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Notification shown when the countdown finishes.
    pub fn timer_complete() -> Self {
        Self::new("⏰ タイマー終了", "設定した時間が経過しました！")
    }
}

/// Trait for notification delivery, allowing a mock in tests.
pub trait Notifier {
    /// Sends a notification without blocking the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be dispatched.
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Returns true if notifications can be delivered.
    fn is_available(&self) -> bool;
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.send(notification)
    }

    fn is_available(&self) -> bool {
        DesktopNotifier::command_exists()
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        (**self).notify(notification)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Mock notifier for testing.
#[derive(Debug)]
pub struct MockNotifier {
    notifications: Mutex<Vec<Notification>>,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_complete_content() {
        let notification = Notification::timer_complete();
        assert!(notification.title.contains("タイマー終了"));
        assert!(notification.body.contains("経過しました"));
    }

    #[test]
    fn test_mock_records() {
        let notifier = MockNotifier::new();
        notifier.notify(&Notification::timer_complete()).unwrap();

        assert_eq!(notifier.notification_count(), 1);
        assert_eq!(notifier.get_notifications()[0], Notification::timer_complete());
    }

    #[test]
    fn test_mock_failure_and_availability() {
        let notifier = MockNotifier::new();
        assert!(notifier.is_available());
        notifier.set_available(false);
        assert!(!notifier.is_available());

        notifier.set_should_fail(true);
        assert!(notifier.notify(&Notification::timer_complete()).is_err());
        assert_eq!(notifier.notification_count(), 0);
    }

    #[test]
    fn test_arc_forwards() {
        let notifier = Arc::new(MockNotifier::new());
        let shared = Arc::clone(&notifier);
        Notifier::notify(&shared, &Notification::new("t", "b")).unwrap();
        assert_eq!(notifier.notification_count(), 1);
    }
}
