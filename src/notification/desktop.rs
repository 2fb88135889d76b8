//! Desktop notifications through the platform notification command.
//!
//! - macOS: `osascript -e 'display notification ...'`
//! - other Unix: `notify-send <title> <body>`
//!
//! The command runs on the blocking pool with a timeout so the event loop
//! never waits on it; the outcome is only logged.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::error::NotificationError;
use super::Notification;

/// Default timeout for the notification command in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Maximum accepted length for a title or body.
const MAX_TEXT_LENGTH: usize = 200;

/// Sends notifications by running the platform notification command.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    timeout_seconds: u64,
}

impl DesktopNotifier {
    /// Creates a notifier with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Sets the command timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Returns true if the notification command is installed.
    #[must_use]
    pub fn command_exists() -> bool {
        notification_program().is_some_and(|program| find_program(program).is_some())
    }

    /// Spawns the notification command in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid, the platform has no
    /// notification command, or no tokio runtime is running.
    pub fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        validate_text(&notification.title)?;
        validate_text(&notification.body)?;

        let (program, args) = notification_command(notification)?;
        let program_path = find_program(program)
            .ok_or_else(|| NotificationError::CommandNotFound(program.to_string()))?;
        let handle = Handle::try_current().map_err(|_| NotificationError::NotAvailable)?;

        let timeout_seconds = self.timeout_seconds;
        handle.spawn(async move {
            match run_command(program_path, args, timeout_seconds).await {
                Ok(()) => info!("通知を送信しました"),
                Err(e) => warn!("{} ({})", e, e.suggestion()),
            }
        });
        Ok(())
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the command on the blocking pool, bounded by `timeout_seconds`.
async fn run_command(
    program: PathBuf,
    args: Vec<String>,
    timeout_seconds: u64,
) -> Result<(), NotificationError> {
    let task = tokio::task::spawn_blocking(move || Command::new(&program).args(&args).output());

    let output = timeout(Duration::from_secs(timeout_seconds), task)
        .await
        .map_err(|_| NotificationError::Timeout(timeout_seconds))?
        .map_err(|e| NotificationError::SendFailed(format!("タスク実行エラー: {}", e)))?
        .map_err(|e| NotificationError::SendFailed(format!("コマンド実行エラー: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(NotificationError::SendFailed(stderr.trim().to_string()))
    }
}

fn validate_text(text: &str) -> Result<(), NotificationError> {
    if text.trim().is_empty() {
        return Err(NotificationError::InvalidInput(
            "通知の文言が空です".to_string(),
        ));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(NotificationError::InvalidInput(format!(
            "通知の文言は{}文字以内にしてください",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Name of the notification program on this platform.
fn notification_program() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("osascript")
    } else if cfg!(unix) {
        Some("notify-send")
    } else {
        None
    }
}

/// Builds the program name and arguments for `notification`.
fn notification_command(
    notification: &Notification,
) -> Result<(&'static str, Vec<String>), NotificationError> {
    let program = notification_program().ok_or(NotificationError::NotAvailable)?;

    let args = if program == "osascript" {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(&notification.body),
            escape_applescript(&notification.title)
        );
        vec!["-e".to_string(), script]
    } else {
        vec![notification.title.clone(), notification.body.clone()]
    };

    debug!("Notification command: {} {:?}", program, args);
    Ok((program, args))
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Looks `program` up in `PATH`.
fn find_program(program: &str) -> Option<PathBuf> {
    find_program_in(program, env::var_os("PATH"))
}

/// Only executable files in `paths` count.
fn find_program_in(program: &str, paths: Option<OsString>) -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    which::which_in(program, paths, cwd).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notification {
        Notification::new("⏰ タイマー終了", "設定した時間が経過しました！")
    }

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
        assert_eq!(escape_applescript("plain"), "plain");
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("ok").is_ok());
        assert!(matches!(
            validate_text("   "),
            Err(NotificationError::InvalidInput(_))
        ));
        assert!(validate_text(&"あ".repeat(MAX_TEXT_LENGTH)).is_ok());
        assert!(validate_text(&"あ".repeat(MAX_TEXT_LENGTH + 1)).is_err());
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_command_macos() {
        let (program, args) = notification_command(&sample()).unwrap();
        assert_eq!(program, "osascript");
        assert_eq!(args[0], "-e");
        assert!(args[1].starts_with("display notification \"設定した時間が経過しました！\""));
        assert!(args[1].ends_with("with title \"⏰ タイマー終了\""));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_command_unix() {
        let (program, args) = notification_command(&sample()).unwrap();
        assert_eq!(program, "notify-send");
        assert_eq!(args, vec!["⏰ タイマー終了", "設定した時間が経過しました！"]);
    }

    #[test]
    fn test_find_program_missing() {
        assert!(find_program("definitely-not-a-real-program-12345").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_program_requires_execute_permission() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("notify-send");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        let paths = Some(dir.path().as_os_str().to_owned());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(find_program_in("notify-send", paths.clone()).is_none());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let found = find_program_in("notify-send", paths);
        assert!(found.is_some_and(|path| path.ends_with("notify-send")));
    }

    #[test]
    fn test_send_rejects_empty_title() {
        let notifier = DesktopNotifier::new();
        let result = notifier.send(&Notification::new("", "body"));
        assert!(matches!(result, Err(NotificationError::InvalidInput(_))));
    }

    #[test]
    fn test_send_without_runtime_or_command() {
        // Outside a runtime this fails either on the missing command or the
        // missing runtime; it must never panic.
        let notifier = DesktopNotifier::new().with_timeout(1);
        let result = notifier.send(&sample());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_command_missing_program() {
        let result = run_command(
            PathBuf::from("/nonexistent/notify-send"),
            Vec::new(),
            DEFAULT_TIMEOUT_SECONDS,
        )
        .await;
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
