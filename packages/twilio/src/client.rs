//! Twilio REST client
//!
//! Implements only the read-only calls needed to prove that a set of
//! credentials works: listing accounts and listing Verify rate limits.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::error::TwilioError;

/// Base URLs of the Twilio APIs
#[derive(Debug, Clone)]
pub struct TwilioEndpoints {
    /// Core REST API (default: https://api.twilio.com)
    pub api_base: String,
    /// Verify API (default: https://verify.twilio.com)
    pub verify_base: String,
}

impl Default for TwilioEndpoints {
    fn default() -> Self {
        Self {
            api_base: "https://api.twilio.com".to_string(),
            verify_base: "https://verify.twilio.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub sid: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimit {
    pub sid: String,
    #[serde(default)]
    pub unique_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountPage {
    #[serde(default)]
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct RateLimitPage {
    #[serde(default)]
    rate_limits: Vec<RateLimit>,
}

/// Client authenticated with an account SID and auth token
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    endpoints: TwilioEndpoints,
    account_sid: String,
    auth_token: String,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("endpoints", &self.endpoints)
            .field("account_sid", &self.account_sid)
            .finish_non_exhaustive()
    }
}

impl TwilioClient {
    /// Create a client; both credentials must be non-empty
    pub fn new(
        http: Client,
        endpoints: TwilioEndpoints,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, TwilioError> {
        let account_sid = account_sid.into();
        let auth_token = auth_token.into();

        if account_sid.trim().is_empty() || auth_token.trim().is_empty() {
            return Err(TwilioError::MissingCredentials);
        }

        Ok(Self {
            http,
            endpoints,
            account_sid,
            auth_token,
        })
    }

    /// List accounts visible to these credentials
    #[instrument(skip(self), fields(account_sid = %self.account_sid))]
    pub async fn list_accounts(&self, limit: u32) -> Result<Vec<Account>, TwilioError> {
        let url = build_url(&self.endpoints.api_base, &["2010-04-01", "Accounts.json"])?;
        let page: AccountPage = self.get_page(url, limit).await?;
        debug!("Twilio returned {} account(s)", page.accounts.len());
        Ok(page.accounts)
    }

    /// List rate limits configured on a Verify service
    #[instrument(skip(self), fields(account_sid = %self.account_sid))]
    pub async fn list_verify_rate_limits(
        &self,
        service_sid: &str,
        limit: u32,
    ) -> Result<Vec<RateLimit>, TwilioError> {
        let url = build_url(
            &self.endpoints.verify_base,
            &["v2", "Services", service_sid, "RateLimits"],
        )?;
        let page: RateLimitPage = self.get_page(url, limit).await?;
        debug!("Twilio returned {} rate limit(s)", page.rate_limits.len());
        Ok(page.rate_limits)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: Url, limit: u32) -> Result<T, TwilioError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .query(&[("PageSize", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::from_response(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Append escaped path segments to a base URL
fn build_url(base: &str, segments: &[&str]) -> Result<Url, TwilioError> {
    let mut url = Url::parse(base).map_err(|e| TwilioError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| TwilioError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
