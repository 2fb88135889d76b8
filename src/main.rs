//! Timekeeper - countdown timer and stopwatch for the terminal
//!
//! Two modes share one screen:
//! - Timer: counts a configured duration down to zero, with cues at 30/10/5 seconds
//! - Stopwatch: counts up, optionally in tenths of a second

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use timekeeper::app::App;
use timekeeper::cli::{Cli, Commands, Display, Screen};
use timekeeper::config::AppConfig;
use timekeeper::notification::DesktopNotifier;
use timekeeper::sound::try_create_player;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_tracing(cli.verbose, cli.log_file.as_deref()) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// The screen is owned by the app while it runs, so logs go to `log_file`
/// or are discarded.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("ログファイルを作成できません: {}", path.display())
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }

    Ok(())
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("設定ファイルの読み込みに失敗しました")?;
    let Some(launch) = cli.apply_overrides(&mut config) else {
        return Ok(());
    };

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("端末から実行してください（標準入出力が端末ではありません）");
    }

    let sound = if config.sound.enabled {
        try_create_player(config.sound.sound_dir.clone(), config.sound.volume)
    } else {
        info!("Sound disabled");
        None
    };
    let notifier = config.notifications.then(DesktopNotifier::new);

    let mut app = App::new(&config, sound, notifier);
    app.prepare(launch);

    let mut screen = Screen::enter().context("端末の初期化に失敗しました")?;
    let result = app.run(&mut screen).await;
    screen.leave().context("端末の復元に失敗しました")?;
    result?;

    Display::show_summary(app.tracker().mode(), &app.tracker().display());
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["timekeeper"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_timer() {
        let cli = Cli::parse_from(["timekeeper", "timer", "--minutes", "25"]);
        assert!(matches!(cli.command, Some(Commands::Timer(_))));
    }

    #[test]
    fn test_cli_parse_stopwatch() {
        let cli = Cli::parse_from(["timekeeper", "stopwatch"]);
        assert!(matches!(cli.command, Some(Commands::Stopwatch(_))));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["timekeeper", "--verbose", "timer"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
