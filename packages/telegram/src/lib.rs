// ABOUTME: Minimal Telegram Bot API client
// ABOUTME: Bot identity lookup and webhook registration used for bot settings checks

pub mod client;
pub mod error;

pub use client::{BotUser, TelegramClient};
pub use error::TelegramError;
