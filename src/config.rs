//! Configuration and settings management
//!
//! Loads the optional env file and builds [`Settings`] from layered sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::BotError;

/// Env file loaded when `ENV_FILE` is not set
pub const DEFAULT_ENV_FILE: &str = "key.env";

/// Telegram Bot API token.
///
/// `Debug` output is masked so the secret never reaches the logs.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token string
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token value, for handing to the Bot API client only
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the token is empty or whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token(<redacted>)")
        }
    }
}

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token (`TELEGRAM_TOKEN`)
    #[serde(default)]
    pub telegram_token: Token,

    /// Custom Bot API server (`TELEGRAM_API_URL`)
    pub telegram_api_url: Option<String>,

    /// Publish the command menu on startup (`REGISTER_COMMANDS`)
    #[serde(default = "default_register_commands")]
    pub register_commands: bool,
}

const fn default_register_commands() -> bool {
    true
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] if a source cannot be read or deserialized.
    pub fn new() -> Result<Self, BotError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize settings from an already built [`Config`]
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] if deserialization fails.
    pub fn from_config(config: Config) -> Result<Self, BotError> {
        Ok(config.try_deserialize()?)
    }

    /// Settings holding only a token, everything else at defaults
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            telegram_token: Token::new(token),
            telegram_api_url: None,
            register_commands: default_register_commands(),
        }
    }
}

/// Build the layered configuration: optional files, then `APP__` prefixed
/// variables, then plain environment variables.
///
/// # Errors
///
/// Returns a `ConfigError` if a present source cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        // Local overrides, not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // TELEGRAM_TOKEN -> telegram_token; empty values count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// Outcome of loading the env file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// File found and applied
    Loaded(PathBuf),
    /// No file at the path
    Missing(PathBuf),
    /// File exists but could not be parsed
    Invalid {
        /// Path that failed
        path: PathBuf,
        /// Parser message
        error: String,
    },
}

impl EnvFileStatus {
    /// Report the outcome. Call after logging is initialized.
    pub fn log(&self) {
        match self {
            Self::Loaded(path) => info!("Loaded environment file {}", path.display()),
            Self::Missing(path) => info!(
                "Environment file {} not found, using process environment only",
                path.display()
            ),
            Self::Invalid { path, error } => {
                warn!("Failed to parse environment file {}: {}", path.display(), error);
            }
        }
    }
}

/// Env file path: `ENV_FILE` if set and non-empty, else [`DEFAULT_ENV_FILE`]
#[must_use]
pub fn env_file_path() -> PathBuf {
    std::env::var("ENV_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from)
}

/// Load key-value pairs from `path` into the process environment.
///
/// Variables already set in the environment are not overridden.
pub fn load_env_file(path: &Path) -> EnvFileStatus {
    if !path.is_file() {
        return EnvFileStatus::Missing(path.to_path_buf());
    }
    match dotenvy::from_path(path) {
        Ok(()) => EnvFileStatus::Loaded(path.to_path_buf()),
        Err(e) => EnvFileStatus::Invalid {
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    }
}
