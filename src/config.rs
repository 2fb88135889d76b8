//! Application configuration.
//!
//! Settings are read from a JSON file and then overridden by command line
//! flags. Without `--config`, the file is looked up at
//! `<config_dir>/timekeeper/config.json`; a missing default file simply
//! yields the defaults.
//!
//! ```json
//! {
//!   "timer": { "minutes": 3, "seconds": 0 },
//!   "stopwatch": { "show_tenths": true },
//!   "sound": { "enabled": true, "volume": 0.7, "sound_dir": "/home/me/sounds" },
//!   "notifications": true,
//!   "presets": [{ "minutes": 1 }, { "minutes": 3 }, { "minutes": 0, "seconds": 30 }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::sound::{Tone, DEFAULT_VOLUME};
use crate::types::TimerSettings;

/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "timekeeper";

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.json";

/// Maximum number of presets (bound to keys 1-9).
pub const MAX_PRESETS: usize = 9;

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("設定ファイルを読み込めません: {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("設定ファイルの形式が正しくありません: {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("設定値が不正です: {0}")]
    Invalid(String),
}

// ============================================================================
// Defaults
// ============================================================================

fn default_title() -> String {
    "timekeeper".to_string()
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_beep_frequency_hz() -> u32 {
    Tone::default().frequency_hz
}

fn default_beep_duration_ms() -> u64 {
    Tone::default().duration_ms
}

fn default_presets() -> Vec<TimerSettings> {
    [1, 3, 5, 10, 15, 30]
        .into_iter()
        .map(|minutes| TimerSettings::new(minutes, 0))
        .collect()
}

// ============================================================================
// Config Types
// ============================================================================

/// Stopwatch options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchConfig {
    /// Show tenths of a second (refreshes every 100ms instead of 1s)
    #[serde(default)]
    pub show_tenths: bool,
}

/// Sound options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Whether sound is played at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume for cue files (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Directory with cue files (set.mp3, right.mp3, reset.mp3, seikai.mp3, alert.mp3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_dir: Option<PathBuf>,

    /// Countdown cue beep frequency
    #[serde(default = "default_beep_frequency_hz")]
    pub beep_frequency_hz: u32,

    /// Countdown cue beep length
    #[serde(default = "default_beep_duration_ms")]
    pub beep_duration_ms: u64,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            sound_dir: None,
            beep_frequency_hz: default_beep_frequency_hz(),
            beep_duration_ms: default_beep_duration_ms(),
        }
    }
}

impl SoundConfig {
    /// Beep played at the countdown cue points.
    #[must_use]
    pub fn beep_tone(&self) -> Tone {
        Tone::new(self.beep_frequency_hz, self.beep_duration_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base terminal window title
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial countdown duration
    #[serde(default)]
    pub timer: TimerSettings,

    /// Stopwatch options
    #[serde(default)]
    pub stopwatch: StopwatchConfig,

    /// Sound options
    #[serde(default)]
    pub sound: SoundConfig,

    /// Whether a desktop notification is shown on completion
    #[serde(default = "default_true")]
    pub notifications: bool,

    /// Durations bound to keys 1-9
    #[serde(default = "default_presets")]
    pub presets: Vec<TimerSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            timer: TimerSettings::default(),
            stopwatch: StopwatchConfig::default(),
            sound: SoundConfig::default(),
            notifications: true,
            presets: default_presets(),
        }
    }
}

impl AppConfig {
    /// Returns the default config file path, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Otherwise the default
    /// path is tried and defaults are used when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("title は空にできません".to_string()));
        }
        self.timer
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("timer: {}", e)))?;

        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::Invalid(
                "sound.volume は0.0-1.0の範囲で指定してください".to_string(),
            ));
        }
        if !(20..=20_000).contains(&self.sound.beep_frequency_hz) {
            return Err(ConfigError::Invalid(
                "sound.beep_frequency_hz は20-20000の範囲で指定してください".to_string(),
            ));
        }
        if !(1..=2_000).contains(&self.sound.beep_duration_ms) {
            return Err(ConfigError::Invalid(
                "sound.beep_duration_ms は1-2000の範囲で指定してください".to_string(),
            ));
        }

        if self.presets.len() > MAX_PRESETS {
            return Err(ConfigError::Invalid(format!(
                "presets は{}個までです",
                MAX_PRESETS
            )));
        }
        for (index, preset) in self.presets.iter().enumerate() {
            preset
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("presets[{}]: {}", index, e)))?;
            if preset.total_seconds() == 0 {
                return Err(ConfigError::Invalid(format!(
                    "presets[{}]: 0秒のプリセットは指定できません",
                    index
                )));
            }
        }

        Ok(())
    }

    /// Returns the preset bound to digit key `number` (1-based).
    #[must_use]
    pub fn preset(&self, number: usize) -> Option<TimerSettings> {
        number
            .checked_sub(1)
            .and_then(|index| self.presets.get(index))
            .copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.title, "timekeeper");
        assert_eq!(config.timer, TimerSettings::default());
        assert!(!config.stopwatch.show_tenths);
        assert!(config.sound.enabled);
        assert_eq!(config.sound.volume, 0.7);
        assert_eq!(config.sound.beep_tone(), Tone::new(600, 150));
        assert!(config.notifications);
        assert_eq!(config.presets.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let file = write_config(
            r#"{
                "title": "Kitchen",
                "timer": { "minutes": 3 },
                "stopwatch": { "show_tenths": true },
                "sound": { "volume": 0.5, "beep_frequency_hz": 880 },
                "notifications": false,
                "presets": [{ "minutes": 0, "seconds": 30 }]
            }"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.title, "Kitchen");
        assert_eq!(config.timer, TimerSettings::new(3, 0));
        assert!(config.stopwatch.show_tenths);
        assert_eq!(config.sound.volume, 0.5);
        assert_eq!(config.sound.beep_tone(), Tone::new(880, 150));
        assert!(config.sound.enabled);
        assert!(!config.notifications);
        assert_eq!(config.presets, vec![TimerSettings::new(0, 30)]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/timekeeper.json")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("{ not json");
        let result = AppConfig::load(Some(file.path()));

        match result {
            Err(err @ ConfigError::Parse { .. }) => {
                assert!(err.to_string().contains("形式が正しくありません"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = write_config(r#"{ "timer": { "minutes": 1, "seconds": 75 } }"#);
        let result = AppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = AppConfig::default();
        config.sound.volume = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sound.beep_frequency_hz = 5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.presets = vec![TimerSettings::new(1, 0); MAX_PRESETS + 1];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.presets = vec![TimerSettings::new(0, 0)];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("presets[0]"));

        let mut config = AppConfig::default();
        config.title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preset_lookup() {
        let config = AppConfig::default();
        assert_eq!(config.preset(1), Some(TimerSettings::new(1, 0)));
        assert_eq!(config.preset(6), Some(TimerSettings::new(30, 0)));
        assert_eq!(config.preset(7), None);
        assert_eq!(config.preset(0), None);
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = AppConfig::default_path() {
            assert!(path.ends_with("timekeeper/config.json"));
        }
    }
}
