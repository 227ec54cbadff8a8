// ABOUTME: Live settings service
// ABOUTME: Validated updates, forced writes, error refresh, and listing for display

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::catalog::KnownSetting;
use crate::error::SettingsError;
use crate::proxy::LiveSettings;
use crate::types::{mask_secret, value_as_text, LiveSetting, SettingView};
use crate::validation::SettingValidator;

pub struct LiveSettingsService {
    validator: SettingValidator,
}

impl LiveSettingsService {
    pub fn new(validator: SettingValidator) -> Self {
        Self { validator }
    }

    pub fn settings(&self) -> &LiveSettings {
        self.validator.settings()
    }

    /// Validate a candidate without storing it
    pub async fn validate(&self, name: &str, value: &Value) -> Option<String> {
        self.validator.validate(name, Some(value)).await
    }

    /// Validate the stored (or default) value of `name`
    pub async fn validate_stored(&self, name: &str) -> Result<Option<String>, SettingsError> {
        let value = self.settings().get(name).await?;
        Ok(self.validator.validate(name, value.as_ref()).await)
    }

    fn known(&self, name: &str) -> Result<&KnownSetting, SettingsError> {
        self.settings()
            .catalog()
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))
    }

    /// Store `value` only if it passes validation
    #[instrument(skip(self, value))]
    pub async fn update(&self, name: &str, value: Value) -> Result<LiveSetting, SettingsError> {
        let known = self.known(name)?;

        if let Some(reason) = self.validator.validate(known.name, Some(&value)).await {
            warn!("Rejected new value for {}: {}", known.name, reason);
            return Err(SettingsError::Rejected {
                name: known.name.to_string(),
                reason,
            });
        }

        let stored = self.settings().set_with_error(known.name, value, None).await?;
        info!("Updated live setting {}", stored.name);
        Ok(stored)
    }

    /// Store `value` regardless of validation, recording the outcome
    #[instrument(skip(self, value))]
    pub async fn force_update(
        &self,
        name: &str,
        value: Value,
    ) -> Result<LiveSetting, SettingsError> {
        let known = self.known(name)?;

        let error = self.validator.validate(known.name, Some(&value)).await;
        if let Some(reason) = &error {
            warn!("Storing {} despite validation error: {}", known.name, reason);
        }

        Ok(self.settings().set_with_error(known.name, value, error).await?)
    }

    /// Re-validate every stored setting and persist the results
    #[instrument(skip(self))]
    pub async fn refresh_errors(&self) -> Result<Vec<(String, Option<String>)>, SettingsError> {
        let records = self.settings().records().await?;
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let error = self.validator.get_error(&record).await;
            if error != record.error {
                self.settings().set_error(&record.name, error.clone()).await?;
            }
            results.push((record.name, error));
        }

        info!("Refreshed validation for {} setting(s)", results.len());
        Ok(results)
    }

    /// Every known setting merged with its stored record
    pub async fn list(&self) -> Result<Vec<SettingView>, SettingsError> {
        let settings = self.settings();
        let mut views = Vec::new();

        for known in settings.catalog().iter() {
            let record = settings.record(known.name).await?;
            let value = match &record {
                Some(r) => Some(r.value.clone()),
                None => settings.get(known.name).await?,
            };

            let value = match value {
                Some(v) if known.is_secret && !v.is_null() => {
                    Some(Value::String(mask_secret(&value_as_text(&v))))
                }
                other => other,
            };

            views.push(SettingView {
                name: known.name.to_string(),
                description: known.description.to_string(),
                value,
                is_secret: known.is_secret,
                validated: self.validator.has_check(known.name),
                error: record.as_ref().and_then(|r| r.error.clone()),
                updated_at: record.map(|r| r.updated_at),
            });
        }

        Ok(views)
    }
}
