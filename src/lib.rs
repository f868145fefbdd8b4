#![deny(missing_docs)]
//! Greeter Bot - a small Telegram bot.
//!
//! Answers `/start` with a greeting, `/help` with a fixed hint and echoes
//! every other text message back to the chat it came from.

/// Telegram bot implementation.
pub mod bot;
/// Configuration management.
pub mod config;
/// Error types.
pub mod error;
/// Logging setup with secret redaction.
pub mod logging;

pub use error::BotError;
