//! Startup error taxonomy.
//!
//! Transport failures during polling are owned by teloxide and never surface
//! here; send failures inside handlers are logged where they happen.

use thiserror::Error;

/// Errors that abort bot startup
#[derive(Debug, Error)]
pub enum BotError {
    /// Token missing/empty or a configuration source could not be read
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The HTTP client or the Bot API endpoint could not be set up
    #[error("Client construction error: {0}")]
    ClientConstruction(String),
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_configuration() {
        let err: BotError = config::ConfigError::NotFound("telegram_token".to_string()).into();
        assert!(matches!(err, BotError::Configuration(_)));
        assert!(err.to_string().contains("telegram_token"));
    }

    #[test]
    fn test_display_prefixes() {
        let err = BotError::ClientConstruction("bad url".to_string());
        assert_eq!(err.to_string(), "Client construction error: bad url");
    }
}
