//! Telegram delivery: commands, the dispatcher schema and reply formatting

pub mod bot;
pub mod handlers;
pub mod messages;

pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
