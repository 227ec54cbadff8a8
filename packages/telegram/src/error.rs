//! Telegram error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    /// Token does not look like `<bot id>:<secret>`
    #[error("Invalid token")]
    InvalidToken,

    /// Transport failure; the request URL is stripped since it embeds the token
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("{description}")]
    Api { code: Option<i64>, description: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}
