use lazy_regex::regex_find;
use teloxide::utils::command::BotCommands;

/// Leading character of every bot command
pub const COMMAND_PREFIX: char = '/';

/// Command token at the start of `text`, as Telegram marks it with a
/// `bot_command` entity: `/` followed by 1-32 word characters and an
/// optional `@botname`.
///
/// `/`, `//`, `/ hello` or `/привет` carry no command and return `None`.
#[must_use]
pub fn command_token(text: &str) -> Option<&str> {
    regex_find!(r"^/[A-Za-z0-9_]{1,32}(?:@[A-Za-z0-9_]+)?", text)
}

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Поддерживаемые команды:")]
pub enum Command {
    /// Greet the user
    #[command(description = "Начать работу.")]
    Start,
    /// Show the help hint
    #[command(description = "Помощь.")]
    Help,
}

/// Where an incoming message goes. Evaluated once per message, first match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// Plain text, echoed back verbatim
    Echo(String),
    /// Non-text content, unknown commands, commands for another bot
    Ignore,
}

impl Route {
    /// Classify message text.
    ///
    /// Only the command token is parsed, so `/start now` still greets.
    /// `/help@other_bot` and unknown commands are ignored. Text that merely
    /// begins with a slash but holds no command token is echoed.
    ///
    /// # Examples
    ///
    /// ```
    /// use greeter_bot::bot::Route;
    ///
    /// assert_eq!(Route::classify(Some("/help"), "greeter_bot"), Route::Help);
    /// assert_eq!(Route::classify(Some("hi"), "greeter_bot"), Route::Echo("hi".into()));
    /// assert_eq!(Route::classify(None, "greeter_bot"), Route::Ignore);
    /// ```
    #[must_use]
    pub fn classify(text: Option<&str>, bot_username: &str) -> Self {
        let Some(text) = text else {
            return Self::Ignore;
        };
        let Some(token) = command_token(text) else {
            return Self::Echo(text.to_string());
        };

        match Command::parse(&token.to_lowercase(), &bot_username.to_lowercase()) {
            Ok(Command::Start) => Self::Start,
            Ok(Command::Help) => Self::Help,
            Err(_) => Self::Ignore,
        }
    }

    /// Short name for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Echo(_) => "echo",
            Self::Ignore => "ignore",
        }
    }
}
