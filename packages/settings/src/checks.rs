// ABOUTME: Standard live setting checks
// ABOUTME: Twilio, Telegram, Slack redirect host, and cloud connector validation

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use oncall_cloud::CloudConnector;
use oncall_core::{engine_url, EngineConfig, PhoneNumber};
use oncall_telegram::TelegramClient;
use oncall_twilio::{TwilioClient, TwilioEndpoints};
use reqwest::Client;
use sqlx::SqlitePool;
use tracing::debug;
use url::Url;

use crate::catalog::names;
use crate::error::SettingsError;
use crate::proxy::LiveSettings;
use crate::validation::{
    prettify_telegram_error, prettify_twilio_error, SettingCheck, SettingValidator,
    ValidatorBuilder,
};

type BoxError = Box<dyn Error + Send + Sync>;

pub const PHONE_FORMAT_ERROR: &str =
    "Please specify a valid phone number in the following format: +XXXXXXXXXXX";
pub const HTTPS_REQUIRED_ERROR: &str = "Must use https";

/// Page size for credential checks; one record is enough to prove access
const CHECK_PAGE_SIZE: u32 = 1;

/// External services the checks talk to
#[derive(Clone)]
pub struct Providers {
    pub http: Client,
    pub twilio: TwilioEndpoints,
    pub telegram_api_url: String,
    pub cloud: Arc<CloudConnector>,
}

impl Providers {
    pub fn from_config(config: &EngineConfig, pool: SqlitePool) -> Result<Self, SettingsError> {
        let http = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            cloud: Arc::new(CloudConnector::new(
                http.clone(),
                config.cloud_api_url.clone(),
                pool,
            )),
            twilio: TwilioEndpoints {
                api_base: config.twilio_api_url.clone(),
                verify_base: config.twilio_verify_url.clone(),
            },
            telegram_api_url: config.telegram_api_url.clone(),
            http,
        })
    }

    fn twilio_client(&self, account_sid: &str, auth_token: &str) -> Result<TwilioClient, BoxError> {
        Ok(TwilioClient::new(
            self.http.clone(),
            self.twilio.clone(),
            account_sid,
            auth_token,
        )?)
    }

    fn telegram_client(&self, token: &str) -> Result<TelegramClient, BoxError> {
        Ok(TelegramClient::with_api_base(
            self.http.clone(),
            &self.telegram_api_url,
            token,
        )?)
    }
}

/// Checks that make one outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteKind {
    TwilioAccountSid,
    TwilioAuthToken,
    TwilioVerifyServiceSid,
    TelegramToken,
    TelegramWebhookHost,
    CloudToken,
}

struct RemoteCheck {
    kind: RemoteKind,
    providers: Providers,
}

#[async_trait]
impl SettingCheck for RemoteCheck {
    async fn check(&self, value: &str, settings: &LiveSettings) -> Option<String> {
        let p = &self.providers;

        match self.kind {
            RemoteKind::TwilioAccountSid => {
                twilio_outcome(twilio_account_sid(p, value, settings).await)
            }
            RemoteKind::TwilioAuthToken => {
                twilio_outcome(twilio_auth_token(p, value, settings).await)
            }
            RemoteKind::TwilioVerifyServiceSid => {
                twilio_outcome(twilio_verify_service_sid(p, value, settings).await)
            }
            RemoteKind::TelegramToken => telegram_outcome(telegram_token(p, value).await),
            RemoteKind::TelegramWebhookHost => {
                telegram_outcome(telegram_webhook_host(p, value, settings).await)
            }
            RemoteKind::CloudToken => match p.cloud.sync_with_cloud(value).await {
                Ok(connection) => {
                    debug!("Cloud token accepted for {}", connection.cloud_url);
                    None
                }
                Err(e) => Some(e.to_string()),
            },
        }
    }
}

fn twilio_outcome(result: Result<(), BoxError>) -> Option<String> {
    result.err().map(|e| prettify_twilio_error(&*e))
}

fn telegram_outcome(result: Result<(), BoxError>) -> Option<String> {
    result.err().map(|e| prettify_telegram_error(&*e))
}

async fn twilio_account_sid(
    providers: &Providers,
    account_sid: &str,
    settings: &LiveSettings,
) -> Result<(), BoxError> {
    let auth_token = settings.get_text(names::TWILIO_AUTH_TOKEN).await?;
    providers
        .twilio_client(account_sid, &auth_token)?
        .list_accounts(CHECK_PAGE_SIZE)
        .await?;
    Ok(())
}

async fn twilio_auth_token(
    providers: &Providers,
    auth_token: &str,
    settings: &LiveSettings,
) -> Result<(), BoxError> {
    let account_sid = settings.get_text(names::TWILIO_ACCOUNT_SID).await?;
    providers
        .twilio_client(&account_sid, auth_token)?
        .list_accounts(CHECK_PAGE_SIZE)
        .await?;
    Ok(())
}

async fn twilio_verify_service_sid(
    providers: &Providers,
    service_sid: &str,
    settings: &LiveSettings,
) -> Result<(), BoxError> {
    let account_sid = settings.get_text(names::TWILIO_ACCOUNT_SID).await?;
    let auth_token = settings.get_text(names::TWILIO_AUTH_TOKEN).await?;
    providers
        .twilio_client(&account_sid, &auth_token)?
        .list_verify_rate_limits(service_sid, CHECK_PAGE_SIZE)
        .await?;
    Ok(())
}

async fn telegram_token(providers: &Providers, token: &str) -> Result<(), BoxError> {
    providers.telegram_client(token)?.get_me().await?;
    Ok(())
}

async fn telegram_webhook_host(
    providers: &Providers,
    host: &str,
    settings: &LiveSettings,
) -> Result<(), BoxError> {
    let token = settings.get_text(names::TELEGRAM_TOKEN).await?;
    let client = providers.telegram_client(&token)?;
    let webhook_url = engine_url(host, "/telegram/")?;
    client.set_webhook(&webhook_url).await?;
    Ok(())
}

/// E.164 structural check, no network access
pub fn check_twilio_number(value: &str) -> Option<String> {
    match PhoneNumber::parse(value) {
        Ok(_) => None,
        Err(_) => Some(PHONE_FORMAT_ERROR.to_string()),
    }
}

/// The redirect host must be an absolute https URL
pub fn check_slack_redirect_host(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "https" => None,
        _ => Some(HTTPS_REQUIRED_ERROR.to_string()),
    }
}

/// Registry with every standard check
pub fn standard_checks(providers: &Providers) -> ValidatorBuilder {
    let remote = |kind| RemoteCheck {
        kind,
        providers: providers.clone(),
    };

    ValidatorBuilder::new()
        .register(names::TWILIO_ACCOUNT_SID, remote(RemoteKind::TwilioAccountSid))
        .register(names::TWILIO_AUTH_TOKEN, remote(RemoteKind::TwilioAuthToken))
        .register(
            names::TWILIO_VERIFY_SERVICE_SID,
            remote(RemoteKind::TwilioVerifyServiceSid),
        )
        .register_fn(names::TWILIO_NUMBER, check_twilio_number)
        .register_fn(names::SLACK_INSTALL_RETURN_REDIRECT_HOST, check_slack_redirect_host)
        .register(names::TELEGRAM_TOKEN, remote(RemoteKind::TelegramToken))
        .register(
            names::TELEGRAM_WEBHOOK_HOST,
            remote(RemoteKind::TelegramWebhookHost),
        )
        .register(names::GRAFANA_CLOUD_ONCALL_TOKEN, remote(RemoteKind::CloudToken))
}

impl SettingValidator {
    /// Validator wired to the real providers
    pub fn standard(settings: LiveSettings, providers: &Providers) -> Result<Self, SettingsError> {
        standard_checks(providers).build(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+15551234567")]
    #[case("+44 20 7946 0958")]
    #[case("+1 (555) 123-4567")]
    fn test_valid_phone_numbers(#[case] number: &str) {
        assert_eq!(check_twilio_number(number), None);
    }

    #[rstest]
    #[case("not-a-number")]
    #[case("15551234567")]
    #[case("+0123456789")]
    #[case("+123")]
    fn test_invalid_phone_numbers(#[case] number: &str) {
        assert_eq!(
            check_twilio_number(number).as_deref(),
            Some(PHONE_FORMAT_ERROR)
        );
    }

    #[rstest]
    #[case("https://example.com", None)]
    #[case("https://oncall.example.com/slack", None)]
    #[case("http://example.com", Some(HTTPS_REQUIRED_ERROR))]
    #[case("example.com", Some(HTTPS_REQUIRED_ERROR))]
    #[case("ftp://example.com", Some(HTTPS_REQUIRED_ERROR))]
    fn test_slack_redirect_host(#[case] host: &str, #[case] expected: Option<&str>) {
        assert_eq!(check_slack_redirect_host(host).as_deref(), expected);
    }
}
