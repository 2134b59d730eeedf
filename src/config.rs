//! Configuration loader and validator for the homework status relay.
//!
//! Tunables come from an optional YAML file; credentials come from the
//! environment and override whatever the file holds.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub app: App,
    pub practicum: Practicum,
    pub telegram: Telegram,
}

/// Poll loop timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct App {
    pub retry_period_secs: u64,
    pub error_retry_period_secs: u64,
}

/// Status API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Practicum {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub token: String,
}

/// Telegram bot settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Telegram {
    pub bot_token: String,
    pub chat_id: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            retry_period_secs: 600,
            error_retry_period_secs: 600,
        }
    }
}

impl Default for Practicum {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            token: String::new(),
        }
    }
}

impl App {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn error_retry_period(&self) -> Duration {
        Duration::from_secs(self.error_retry_period_secs)
    }
}

impl Config {
    /// Overlay credentials found through `lookup` (normally the process
    /// environment). Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_PRACTICUM_TOKEN) {
            self.practicum.token = v;
        }
        if let Some(v) = get(ENV_TELEGRAM_TOKEN) {
            self.telegram.bot_token = v;
        }
        if let Some(v) = get(ENV_TELEGRAM_CHAT_ID) {
            self.telegram.chat_id = v;
        }
    }
}

/// Load configuration from the environment and an optional YAML file, then validate it.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load`] with an explicit variable lookup.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let cfg = read_with(path, lookup)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Read the file and overlay credentials without validating.
pub fn read_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        }
        None => Config::default(),
    };
    cfg.apply_env(lookup);
    Ok(cfg)
}

/// Validate a configuration instance. Every missing credential is reported at once.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let missing: Vec<&'static str> = [
        (ENV_PRACTICUM_TOKEN, &cfg.practicum.token),
        (ENV_TELEGRAM_TOKEN, &cfg.telegram.bot_token),
        (ENV_TELEGRAM_CHAT_ID, &cfg.telegram.chat_id),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingCredentials(missing));
    }

    if cfg.app.retry_period_secs == 0 {
        return Err(ConfigError::Invalid("app.retry_period_secs must be > 0"));
    }
    if cfg.app.error_retry_period_secs == 0 {
        return Err(ConfigError::Invalid("app.error_retry_period_secs must be > 0"));
    }
    if cfg.practicum.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid("practicum.endpoint must be non-empty"));
    }
    if cfg.practicum.connect_timeout_secs == 0 {
        return Err(ConfigError::Invalid("practicum.connect_timeout_secs must be > 0"));
    }
    if cfg.practicum.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid("practicum.request_timeout_secs must be > 0"));
    }

    Ok(())
}

/// Example YAML content with every key spelled out.
pub fn example() -> &'static str {
    r#"app:
  retry_period_secs: 600
  error_retry_period_secs: 600

practicum:
  endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/"
  connect_timeout_secs: 10
  request_timeout_secs: 30
  token: "YOUR_PRACTICUM_TOKEN"

telegram:
  bot_token: "YOUR_TELEGRAM_BOT_TOKEN"
  chat_id: "123456789"
"#
}
