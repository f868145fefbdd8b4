//! Reply composition and delivery.
//!
//! [`compose_reply`] is pure: it maps a [`Route`] and the sender to the
//! message the bot should send. [`send_reply`] performs the Bot API call.

use crate::bot::commands::Route;
use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ForceReply, ParseMode, User};

/// Fixed answer to `/help`
pub const HELP_TEXT: &str = "Помощь!";

/// Author of an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Telegram user id
    pub id: u64,
    /// First name plus last name, if any
    pub display_name: String,
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            display_name: user.full_name(),
        }
    }
}

/// How the reply text is interpreted by Telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// Sent as-is
    Plain,
    /// Parsed as Telegram HTML
    Html,
}

/// Outbound message composed for one incoming update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body
    pub text: String,
    /// Parse mode of `text`
    pub format: ReplyFormat,
    /// Attach a selective force-reply marker
    pub force_reply: bool,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
            force_reply: false,
        }
    }
}

/// HTML link that mentions `sender` by display name
#[must_use]
pub fn mention_html(sender: &Sender) -> String {
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        sender.id,
        html_escape::encode_text(&sender.display_name)
    )
}

/// Greeting for `/start`.
///
/// Messages without a known author (anonymous admins, channel posts) get
/// the greeting without a mention and without the force-reply marker.
#[must_use]
pub fn greeting(sender: Option<&Sender>) -> Reply {
    match sender {
        Some(sender) => Reply {
            text: format!("Привет, {}! Я ваш бот.", mention_html(sender)),
            format: ReplyFormat::Html,
            force_reply: true,
        },
        None => Reply {
            text: "Привет! Я ваш бот.".to_string(),
            format: ReplyFormat::Html,
            force_reply: false,
        },
    }
}

/// Reply for a routed message, `None` for [`Route::Ignore`]
#[must_use]
pub fn compose_reply(route: &Route, sender: Option<&Sender>) -> Option<Reply> {
    match route {
        Route::Start => Some(greeting(sender)),
        Route::Help => Some(Reply::plain(HELP_TEXT)),
        Route::Echo(text) => Some(Reply::plain(text.clone())),
        Route::Ignore => None,
    }
}

/// Send `reply` to `chat_id`.
///
/// # Errors
///
/// Returns an error if the Bot API request fails.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<()> {
    let mut req = bot.send_message(chat_id, reply.text);
    if reply.format == ReplyFormat::Html {
        req = req.parse_mode(ParseMode::Html);
    }
    if reply.force_reply {
        req = req.reply_markup(ForceReply::new().selective());
    }
    req.await?;
    Ok(())
}
