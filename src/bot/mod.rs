/// Bot commands and message routing
pub mod commands;
/// Reply composition and delivery
pub mod handlers;
/// Service lifecycle: initialize, build client, register handlers, run
pub mod service;

pub use commands::{Command, Route};
pub use service::BotService;
