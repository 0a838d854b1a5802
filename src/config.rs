//! Configuration types for telegram-datasets

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the numeric API ID
pub const ENV_API_ID: &str = "TELEGRAM_API_ID";
/// Environment variable holding the API hash
pub const ENV_API_HASH: &str = "TELEGRAM_API_HASH";
/// Environment variable holding the session username
pub const ENV_USERNAME: &str = "TELEGRAM_USERNAME";
/// Environment variable overriding the API bridge URL
pub const ENV_API_URL: &str = "TELEGRAM_API_URL";
/// Environment variable overriding the dataset directory
pub const ENV_DATA_DIR: &str = "TELEGRAM_DATA_DIR";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "TELEGRAM_TIMEOUT_SECS";

/// Telegram API credentials and transport settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the HTTP bridge to the Telegram API (default: "http://127.0.0.1:8081")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Numeric application ID from my.telegram.org
    pub api_id: i64,

    /// Application hash from my.telegram.org
    pub api_hash: String,

    /// Username naming the authorized session
    pub session: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Where snapshots are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one sub-directory per snapshot (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Main configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// API credentials and transport settings
    pub api: ApiConfig,

    /// Snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first
    /// if present; variables already set in the environment win.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the variable that is missing or invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Same keys and rules as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::config(format!("{key} not set in environment"), key))
        };

        let api_id = required(ENV_API_ID)?
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::config(format!("{ENV_API_ID} is not a number: {e}"), ENV_API_ID))?;
        let api_hash = required(ENV_API_HASH)?;
        let session = required(ENV_USERNAME)?;

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|e| {
                Error::config(
                    format!("{ENV_TIMEOUT_SECS} is not a number of seconds: {e}"),
                    ENV_TIMEOUT_SECS,
                )
            })?),
            None => default_timeout(),
        };

        let config = Self {
            api: ApiConfig {
                base_url: lookup(ENV_API_URL).unwrap_or_else(default_base_url),
                api_id,
                api_hash,
                session,
                timeout,
                user_agent: default_user_agent(),
            },
            storage: StorageConfig {
                data_dir: lookup(ENV_DATA_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.api.api_id <= 0 {
            return Err(Error::config("api_id must be positive", "api_id"));
        }
        if self.api.api_hash.trim().is_empty() {
            return Err(Error::config("api_hash must not be empty", "api_hash"));
        }
        if self.api.session.trim().is_empty() {
            return Err(Error::config("session must not be empty", "session"));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| Error::config(format!("invalid base_url: {e}"), "base_url"))?;
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("telegram-datasets/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
