// ABOUTME: Environment-driven configuration for the live settings engine
// ABOUTME: Provider endpoints, database location, and HTTP timeout

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    default_database_path, DEFAULT_CLOUD_API_URL, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_TELEGRAM_API_URL, DEFAULT_TWILIO_API_URL, DEFAULT_TWILIO_VERIFY_URL,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid HTTP timeout: {0}")]
    InvalidTimeout(#[from] ParseIntError),
    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub database_path: PathBuf,
    pub twilio_api_url: String,
    pub twilio_verify_url: String,
    pub telegram_api_url: String,
    pub cloud_api_url: String,
    pub http_timeout: Duration,
    /// Fall back to an environment variable named like the setting when nothing is stored
    pub env_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            twilio_api_url: DEFAULT_TWILIO_API_URL.to_string(),
            twilio_verify_url: DEFAULT_TWILIO_VERIFY_URL.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            cloud_api_url: DEFAULT_CLOUD_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            env_fallback: true,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let twilio_api_url = url_var(&lookup, "TWILIO_API_URL", defaults.twilio_api_url)?;
        let twilio_verify_url =
            url_var(&lookup, "TWILIO_VERIFY_URL", defaults.twilio_verify_url)?;
        let telegram_api_url = url_var(&lookup, "TELEGRAM_API_URL", defaults.telegram_api_url)?;
        let cloud_api_url =
            url_var(&lookup, "GRAFANA_CLOUD_ONCALL_API_URL", defaults.cloud_api_url)?;

        let database_path = lookup("ONCALL_DATABASE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let http_timeout = match lookup("ONCALL_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>()?;
                if secs == 0 {
                    return Err(ConfigError::ZeroTimeout);
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        let env_fallback = match lookup("LIVE_SETTINGS_ENV_FALLBACK") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        name: "LIVE_SETTINGS_ENV_FALLBACK",
                        value: raw,
                    })
                }
            },
            None => defaults.env_fallback,
        };

        Ok(EngineConfig {
            database_path,
            twilio_api_url,
            twilio_verify_url,
            telegram_api_url,
            cloud_api_url,
            http_timeout,
            env_fallback,
        })
    }
}

fn url_var<F>(lookup: &F, name: &'static str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => {
            let trimmed = value.trim();
            if url::Url::parse(trimmed).is_err() {
                return Err(ConfigError::InvalidUrl { name, value });
            }
            Ok(trimmed.to_string())
        }
        None => Ok(default),
    }
}
