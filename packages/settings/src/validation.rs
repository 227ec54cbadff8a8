// ABOUTME: Per-setting validation
// ABOUTME: Check registry, consistency against the catalog, and error normalization

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use oncall_twilio::TwilioError;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::Validation;
use crate::error::SettingsError;
use crate::proxy::LiveSettings;
use crate::types::{is_empty_value, value_as_text, LiveSetting};

/// Reported for absent, null, or empty values before any check runs
pub const EMPTY_ERROR: &str = "Empty";

/// A check for a single setting
///
/// Returns `None` when the value is acceptable and a human-readable reason
/// otherwise. Implementations must not panic and must convert every failure,
/// including failures reading side inputs from `settings`, into a reason.
#[async_trait]
pub trait SettingCheck: Send + Sync {
    async fn check(&self, value: &str, settings: &LiveSettings) -> Option<String>;
}

/// Adapter for checks that need no I/O
struct FnCheck<F>(F);

#[async_trait]
impl<F> SettingCheck for FnCheck<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    async fn check(&self, value: &str, _settings: &LiveSettings) -> Option<String> {
        (self.0)(value)
    }
}

/// Collects checks and verifies them against the catalog
#[derive(Default)]
pub struct ValidatorBuilder {
    checks: HashMap<String, Arc<dyn SettingCheck>>,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `check` for `name`; a later registration for the same name wins
    pub fn register(mut self, name: &str, check: impl SettingCheck + 'static) -> Self {
        self.checks.insert(name.to_lowercase(), Arc::new(check));
        self
    }

    /// Register a synchronous check
    pub fn register_fn<F>(self, name: &str, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.register(name, FnCheck(check))
    }

    /// Finish the registry.
    ///
    /// Every catalog entry marked [`Validation::Checked`] needs a check, and
    /// every check must belong to a catalog entry.
    pub fn build(self, settings: LiveSettings) -> Result<SettingValidator, SettingsError> {
        let catalog = settings.catalog();

        let missing = catalog
            .iter()
            .filter(|s| s.validation == Validation::Checked)
            .find(|s| !self.checks.contains_key(&s.name.to_lowercase()));
        if let Some(missing) = missing {
            return Err(SettingsError::MissingCheck(missing.name.to_string()));
        }

        let mut unknown: Vec<&String> = self
            .checks
            .keys()
            .filter(|name| catalog.get(name).is_none())
            .collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(SettingsError::UnknownCheck((*name).clone()));
        }

        debug!("Validator ready with {} check(s)", self.checks.len());

        Ok(SettingValidator {
            checks: Arc::new(self.checks),
            settings,
        })
    }
}

/// Validates candidate values for live settings
#[derive(Clone)]
pub struct SettingValidator {
    checks: Arc<HashMap<String, Arc<dyn SettingCheck>>>,
    settings: LiveSettings,
}

impl fmt::Debug for SettingValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.checks.keys().collect();
        names.sort();
        f.debug_struct("SettingValidator")
            .field("checks", &names)
            .finish_non_exhaustive()
    }
}

impl SettingValidator {
    pub fn settings(&self) -> &LiveSettings {
        &self.settings
    }

    pub fn has_check(&self, name: &str) -> bool {
        self.checks.contains_key(&name.to_lowercase())
    }

    /// Validate a candidate value for `name`.
    ///
    /// `None` means valid. Names without a registered check are valid as long
    /// as the value is not empty.
    #[instrument(skip(self, value))]
    pub async fn validate(&self, name: &str, value: Option<&Value>) -> Option<String> {
        let value = match value {
            Some(v) if !is_empty_value(Some(v)) => v,
            _ => return Some(EMPTY_ERROR.to_string()),
        };

        let Some(check) = self.checks.get(&name.to_lowercase()) else {
            return None;
        };

        let error = check.check(&value_as_text(value), &self.settings).await;
        if let Some(reason) = &error {
            debug!("{} rejected: {}", name, reason);
        }
        error
    }

    /// Validate a stored record
    pub async fn get_error(&self, setting: &LiveSetting) -> Option<String> {
        self.validate(&setting.name, Some(&setting.value)).await
    }
}

/// Render a Twilio failure, pointing at Twilio's docs when the error has them
pub fn prettify_twilio_error(err: &(dyn Error + 'static)) -> String {
    match err
        .downcast_ref::<TwilioError>()
        .and_then(TwilioError::code_and_more_info)
    {
        Some((code, more_info)) => {
            format!("Twilio error: code {}. Learn more: {}", code, more_info)
        }
        None => format!("Twilio error: {}", err),
    }
}

pub fn prettify_telegram_error(err: &(dyn Error + 'static)) -> String {
    format!("Telegram error: {}", err)
}
