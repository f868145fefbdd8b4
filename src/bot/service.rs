//! Bot lifecycle.
//!
//! `initialize` → `build_client` → `register_handlers` → `run`. `run`
//! takes the service by value, so nothing can reconfigure it once polling
//! starts. A stopped bot restarts only with the process.

use crate::bot::commands::{Command, Route};
use crate::bot::handlers::{compose_reply, send_reply, Sender};
use crate::config::Settings;
use crate::error::BotError;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, trace, warn};

/// Owns validated settings and drives the bot
pub struct BotService {
    settings: Arc<Settings>,
}

impl BotService {
    /// Validate `settings` and prepare the service.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] if the token is missing or empty.
    pub fn initialize(settings: Settings) -> Result<Self, BotError> {
        if settings.telegram_token.is_blank() {
            return Err(BotError::Configuration(
                "TELEGRAM_TOKEN is not set or empty".to_string(),
            ));
        }
        info!("Configuration loaded successfully.");

        Ok(Self {
            settings: Arc::new(settings),
        })
    }

    /// Settings the service was initialized with
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Construct the Bot API client. Makes no network calls.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ClientConstruction`] if the HTTP client cannot be
    /// built or `telegram_api_url` is not a valid URL.
    pub fn build_client(&self) -> Result<Bot, BotError> {
        let client = teloxide::net::default_reqwest_settings()
            .build()
            .map_err(|e| BotError::ClientConstruction(format!("HTTP client: {e}")))?;
        let bot = Bot::with_client(self.settings.telegram_token.expose(), client);

        let Some(raw_url) = self.settings.telegram_api_url.as_deref() else {
            info!("Bot client created.");
            return Ok(bot);
        };
        let url = reqwest::Url::parse(raw_url).map_err(|e| {
            BotError::ClientConstruction(format!("invalid TELEGRAM_API_URL '{raw_url}': {e}"))
        })?;
        info!("Bot client created (API server: {}).", url);
        Ok(bot.set_api_url(url))
    }

    /// Dispatch tree: text messages are routed once, ignored ones fall
    /// through to the dispatcher's default handler.
    #[must_use]
    pub fn register_handlers() -> UpdateHandler<teloxide::RequestError> {
        Update::filter_message()
            .filter_map(|msg: Message, me: Me| {
                let route = Route::classify(msg.text(), me.username());
                (route != Route::Ignore).then_some(route)
            })
            .endpoint(handle_route)
    }

    /// Poll for updates until Ctrl-C or the dispatcher stops.
    pub async fn run(self, bot: Bot) {
        if self.settings.register_commands {
            publish_commands(&bot).await;
        }

        info!("Bot is running...");

        Dispatcher::builder(bot, Self::register_handlers())
            .default_handler(|upd| async move {
                trace!(update_id = ?upd.id, "Ignoring update");
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Bot stopped.");
    }
}

async fn publish_commands(bot: &Bot) {
    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Command menu published."),
        Err(e) => warn!("Failed to publish command menu: {}", e),
    }
}

async fn handle_route(bot: Bot, msg: Message, route: Route) -> ResponseResult<()> {
    let sender = msg.from.as_ref().map(Sender::from);
    let user_id = sender.as_ref().map_or(0, |s| s.id);

    debug!(
        chat_id = msg.chat.id.0,
        user_id,
        route = route.kind(),
        "Handling message"
    );

    if let Some(reply) = compose_reply(&route, sender.as_ref()) {
        if let Err(e) = send_reply(&bot, msg.chat.id, reply).await {
            error!(
                chat_id = msg.chat.id.0,
                route = route.kind(),
                "Failed to send reply: {}",
                e
            );
        }
    }
    respond(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_with_token() -> Result<(), BotError> {
        let service = BotService::initialize(Settings::with_token("123:abc"))?;
        assert_eq!(service.settings().telegram_token.expose(), "123:abc");
        Ok(())
    }

    #[test]
    fn test_initialize_rejects_empty_token() {
        for token in ["", "   ", "\n"] {
            let result = BotService::initialize(Settings::with_token(token));
            assert!(matches!(result, Err(BotError::Configuration(_))));
        }
    }

    #[test]
    fn test_initialize_then_register_handlers() -> Result<(), BotError> {
        let service = BotService::initialize(Settings::with_token("123:abc"))?;
        let _bot = service.build_client()?;
        let _handler = BotService::register_handlers();
        Ok(())
    }

    #[test]
    fn test_build_client_default_api() -> Result<(), BotError> {
        let service = BotService::initialize(Settings::with_token("123:abc"))?;
        let bot = service.build_client()?;
        assert_eq!(bot.token(), "123:abc");
        assert_eq!(bot.api_url().as_str(), "https://api.telegram.org/");
        Ok(())
    }

    #[test]
    fn test_build_client_custom_api() -> Result<(), BotError> {
        let mut settings = Settings::with_token("123:abc");
        settings.telegram_api_url = Some("http://localhost:8081/".to_string());
        let bot = BotService::initialize(settings)?.build_client()?;
        assert_eq!(bot.api_url().as_str(), "http://localhost:8081/");
        Ok(())
    }

    #[test]
    fn test_build_client_rejects_bad_url() -> Result<(), BotError> {
        let mut settings = Settings::with_token("123:abc");
        settings.telegram_api_url = Some("not a url".to_string());
        let service = BotService::initialize(settings)?;
        assert!(matches!(
            service.build_client(),
            Err(BotError::ClientConstruction(_))
        ));
        Ok(())
    }
}
