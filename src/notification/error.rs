//! Notification system error types.
//!
//! Notification failures are logged and never interrupt the timer.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The platform notification command is not installed.
    #[error("通知コマンドが見つかりません: {0}")]
    CommandNotFound(String),

    /// Failed to send a notification.
    #[error("通知の送信に失敗しました: {0}")]
    SendFailed(String),

    /// The notification command did not finish in time.
    #[error("通知の送信がタイムアウトしました（{0}秒）")]
    Timeout(u64),

    /// Invalid input provided to the notification system.
    #[error("無効な入力: {0}")]
    InvalidInput(String),

    /// Notifications are not supported here.
    #[error("この環境では通知を利用できません")]
    NotAvailable,
}

impl NotificationError {
    /// Returns true if retrying cannot help on this machine.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::CommandNotFound(_) | Self::NotAvailable)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::CommandNotFound(_) => {
                "notify-send (libnotify) をインストールするか --no-notify を指定してください"
            }
            Self::SendFailed(_) => "通知センターの設定を確認してください",
            Self::Timeout(_) => "通知デーモンが応答しているか確認してください",
            Self::InvalidInput(_) => "入力値を確認してください",
            Self::NotAvailable => "--no-notify で通知を無効にできます",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::CommandNotFound("notify-send".to_string());
        assert!(err.to_string().contains("notify-send"));

        let err = NotificationError::Timeout(5);
        assert!(err.to_string().contains("5秒"));

        let err = NotificationError::NotAvailable;
        assert_eq!(err.to_string(), "この環境では通知を利用できません");
    }

    #[test]
    fn test_is_unavailable() {
        assert!(NotificationError::NotAvailable.is_unavailable());
        assert!(NotificationError::CommandNotFound("x".into()).is_unavailable());
        assert!(!NotificationError::SendFailed("x".into()).is_unavailable());
        assert!(!NotificationError::Timeout(5).is_unavailable());
    }

    #[test]
    fn test_suggestion() {
        assert!(NotificationError::CommandNotFound("x".into())
            .suggestion()
            .contains("notify-send"));
        assert!(NotificationError::NotAvailable
            .suggestion()
            .contains("--no-notify"));
    }
}
