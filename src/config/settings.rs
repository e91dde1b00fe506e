//! Application settings loaded from config.toml.
//!
//! Every field has a default, so a missing file or a partial file is valid.
//! Secrets (bot tokens, database URL) are not stored here; they are read from
//! the environment directly before use.

use crate::errors::{Error, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Largest accepted sweep lookahead, one hour
pub const MAX_LOOKAHEAD_SECS: i64 = 3600;

/// UTC+7 (Asia/Novosibirsk, which has no DST)
const DEFAULT_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Complete contents of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reminder calculation and sweep cadence
    pub reminders: ReminderSettings,
    /// Telegram Bot API access
    pub telegram: TelegramSettings,
    /// Habit listing settings
    pub habits: HabitSettings,
    /// Discord user ids promoted to superuser at startup
    pub superusers: Vec<String>,
}

/// Settings for the reminder calculator and the periodic sweep
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Process timezone as a fixed UTC offset, e.g. `"+07:00"`
    #[serde(deserialize_with = "deserialize_offset")]
    pub timezone: FixedOffset,
    /// Seconds between two sweeps
    pub sweep_interval_secs: u64,
    /// Habits due within this many seconds from now are included in a sweep
    pub lookahead_secs: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            timezone: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix()),
            sweep_interval_secs: 60,
            lookahead_secs: 60,
        }
    }
}

impl ReminderSettings {
    /// Current instant in the configured timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Settings for the Telegram messenger
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// Base URL of the Bot API
    pub api_base: String,
    /// Upper bound for a single `sendMessage` call
    pub timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Settings for habit listings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HabitSettings {
    /// Habits per page in `/habits` and `/public_habits`
    pub page_size: u64,
}

impl Default for HabitSettings {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

fn deserialize_offset<'de, D>(deserializer: D) -> std::result::Result<FixedOffset, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|e| serde::de::Error::custom(format!("invalid timezone offset '{raw}': {e}")))
}

/// Parses settings from TOML text and checks value ranges.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is malformed or a value is out of range.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from `HABIT_BUDDY_CONFIG` (or ./config.toml), falling back
/// to defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("HABIT_BUDDY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        let config = load_config(&path)?;
        tracing::info!("Loaded configuration from {path}");
        Ok(config)
    } else {
        tracing::info!("No configuration file at {path}, using defaults");
        Ok(AppConfig::default())
    }
}

impl AppConfig {
    fn validate(&self) -> Result<()> {
        if self.reminders.sweep_interval_secs == 0 {
            return Err(Error::Config {
                message: "reminders.sweep_interval_secs must be at least 1".to_string(),
            });
        }
        if !(0..=MAX_LOOKAHEAD_SECS).contains(&self.reminders.lookahead_secs) {
            return Err(Error::Config {
                message: format!(
                    "reminders.lookahead_secs must be between 0 and {MAX_LOOKAHEAD_SECS}"
                ),
            });
        }
        if self.telegram.timeout_secs == 0 {
            return Err(Error::Config {
                message: "telegram.timeout_secs must be at least 1".to_string(),
            });
        }
        if self.habits.page_size == 0 {
            return Err(Error::Config {
                message: "habits.page_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
