//! Telegram Bot API client
//!
//! Covers the two calls needed by the live settings checks: `getMe` to prove
//! a token works and `setWebhook` to register the engine's webhook URL.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::TelegramError;

const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Identity of the bot that owns a token
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, TelegramError> {
        if self.ok {
            self.result.ok_or_else(|| {
                TelegramError::InvalidResponse(
                    "Response indicated success but had no result".into(),
                )
            })
        } else {
            Err(TelegramError::Api {
                code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| "Unknown Bot API error".to_string()),
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client for the public Bot API
    pub fn new(http: Client, token: &str) -> Result<Self, TelegramError> {
        Self::with_api_base(http, DEFAULT_API_URL, token)
    }

    /// Create a client against a custom Bot API server
    pub fn with_api_base(
        http: Client,
        api_base: &str,
        token: &str,
    ) -> Result<Self, TelegramError> {
        validate_token(token)?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetch the bot's own identity
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<BotUser, TelegramError> {
        let response = self.http.get(self.method_url("getMe")).send().await?;
        let user: BotUser = Self::parse(response).await?;
        debug!("Telegram token belongs to bot {}", user.id);
        Ok(user)
    }

    /// Register `url` as the bot's webhook
    #[instrument(skip(self))]
    pub async fn set_webhook(&self, url: &str) -> Result<bool, TelegramError> {
        let response = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&SetWebhookRequest { url })
            .send()
            .await?;
        Self::parse(response).await
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TelegramError> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ApiResponse<T>>(&body) {
            Ok(envelope) => envelope.into_result(),
            Err(e) if status.is_success() => Err(TelegramError::InvalidResponse(e.to_string())),
            Err(_) => Err(TelegramError::Api {
                code: Some(i64::from(status.as_u16())),
                description: status
                    .canonical_reason()
                    .unwrap_or("Unknown Bot API error")
                    .to_string(),
            }),
        }
    }
}

/// Bot tokens look like `123456789:AAH...`: a numeric bot id, a colon, and a
/// secret, with no whitespace anywhere
fn validate_token(token: &str) -> Result<(), TelegramError> {
    if token.chars().any(char::is_whitespace) {
        return Err(TelegramError::InvalidToken);
    }

    match token.split_once(':') {
        Some((id, secret))
            if id.len() >= 3 && id.chars().all(|c| c.is_ascii_digit()) && !secret.is_empty() =>
        {
            Ok(())
        }
        _ => Err(TelegramError::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw")]
    #[case("123:x")]
    fn test_valid_tokens(#[case] token: &str) {
        assert!(validate_token(token).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("no-colon")]
    #[case("12:short-id")]
    #[case("abc:secret")]
    #[case("123456:")]
    #[case("123456:with space")]
    fn test_invalid_tokens(#[case] token: &str) {
        assert!(matches!(validate_token(token), Err(TelegramError::InvalidToken)));
    }

    #[test]
    fn test_method_url_strips_trailing_slash() {
        let client =
            TelegramClient::with_api_base(Client::new(), "http://localhost:8081/", "123:abc")
                .unwrap();
        assert_eq!(client.method_url("getMe"), "http://localhost:8081/bot123:abc/getMe");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(Client::new(), "123:supersecret").unwrap();
        assert!(!format!("{:?}", client).contains("supersecret"));
    }

    #[test]
    fn test_error_envelope_maps_to_api_error() {
        let envelope: ApiResponse<BotUser> = serde_json::from_str(
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, TelegramError::Api { code: Some(401), .. }));
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
