//! Configuration loading and validation.
//!
//! Numlens reads a single human-owned `config.toml`. The bot token itself
//! never lives in the file; the config names the environment variable that
//! holds it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Telegram channel configuration.
    pub telegram: TelegramConfig,

    /// Remote lookup API configuration.
    pub lookup: LookupConfig,

    /// History persistence settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Per-user anti-spam cooldown settings.
    #[serde(default)]
    pub cooldown: CooldownConfig,
}

/// Telegram-specific configuration.
#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    /// Environment variable name holding the bot token.
    #[serde(default = "default_bot_token_env")]
    pub bot_token_env: String,
}

/// Remote lookup API settings.
#[derive(Debug, Deserialize)]
pub struct LookupConfig {
    /// Endpoint prefix; the queried digits are appended verbatim
    /// (e.g. `https://example.com/api?key=K&type=mobile&term=`).
    pub api_base: String,

    /// Label shown on the report's Owner line. Payload-supplied owner
    /// values are never displayed.
    pub owner_label: String,

    /// Request timeout in seconds. One attempt, no retry.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl LookupConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// History persistence settings.
#[derive(Debug, Deserialize)]
pub struct HistoryConfig {
    /// Path of the JSON history document.
    #[serde(default = "default_history_file")]
    pub file: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
        }
    }
}

/// Per-user anti-spam cooldown settings.
#[derive(Debug, Deserialize)]
pub struct CooldownConfig {
    /// Minimum interval between two lookups by the same user, in seconds.
    #[serde(default = "default_cooldown_secs")]
    pub seconds: u64,
}

impl CooldownConfig {
    /// Cooldown window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            seconds: default_cooldown_secs(),
        }
    }
}

// Default value functions for serde

fn default_bot_token_env() -> String {
    "NUMLENS_TELEGRAM_TOKEN".to_owned()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_history_file() -> PathBuf {
    PathBuf::from("history.json")
}
fn default_cooldown_secs() -> u64 {
    5
}

/// Load the config from a TOML file.
///
/// Validates that `lookup.api_base` parses as an absolute URL so a typo
/// fails at startup instead of on the first lookup.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// API base URL is invalid.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    url::Url::parse(&config.lookup.api_base)
        .map_err(|e| anyhow::anyhow!("invalid lookup.api_base: {e}"))?;
    Ok(config)
}

/// Resolve the default data directory (`~/.numlens/`).
///
/// Holds logs and the history document unless the config says otherwise.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".numlens"))
}
