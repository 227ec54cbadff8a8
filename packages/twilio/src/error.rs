//! Twilio error types

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the Twilio REST API on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("Credentials are required to create a TwilioClient")]
    MissingCredentials,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API answered with an error status
    #[error("HTTP {status} error: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<TwilioErrorBody>,
    },
}

impl TwilioError {
    /// Build an API error from a status code and raw response body
    pub fn from_response(status: u16, raw: &str) -> Self {
        match serde_json::from_str::<TwilioErrorBody>(raw) {
            Ok(body) => {
                let message = body
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Unable to fetch page (status {status})"));
                Self::Api {
                    status,
                    message,
                    body: Some(body),
                }
            }
            Err(_) => {
                let message = if raw.trim().is_empty() {
                    format!("Unable to fetch page (status {status})")
                } else {
                    raw.trim().to_string()
                };
                Self::Api {
                    status,
                    message,
                    body: None,
                }
            }
        }
    }

    /// Vendor error code and documentation link, when the API supplied both
    pub fn code_and_more_info(&self) -> Option<(i64, &str)> {
        match self {
            Self::Api {
                body:
                    Some(TwilioErrorBody {
                        code: Some(code),
                        more_info: Some(more_info),
                        ..
                    }),
                ..
            } => Some((*code, more_info.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_parses_structured_body() {
        let raw = r#"{
            "code": 20003,
            "message": "Authenticate",
            "more_info": "https://www.twilio.com/docs/errors/20003",
            "status": 401
        }"#;
        let err = TwilioError::from_response(401, raw);

        assert_eq!(
            err.code_and_more_info(),
            Some((20003, "https://www.twilio.com/docs/errors/20003"))
        );
        assert_eq!(err.to_string(), "HTTP 401 error: Authenticate");
    }

    #[test]
    fn test_from_response_keeps_plain_body() {
        let err = TwilioError::from_response(502, "Bad Gateway");
        assert!(err.code_and_more_info().is_none());
        assert_eq!(err.to_string(), "HTTP 502 error: Bad Gateway");
    }

    #[test]
    fn test_from_response_without_code() {
        let err = TwilioError::from_response(404, r#"{"message": "Not found"}"#);
        assert!(err.code_and_more_info().is_none());
        assert_eq!(err.to_string(), "HTTP 404 error: Not found");
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = TwilioError::from_response(500, "");
        assert_eq!(err.to_string(), "HTTP 500 error: Unable to fetch page (status 500)");
    }
}
