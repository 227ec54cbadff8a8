// ABOUTME: Live settings proxy
// ABOUTME: Typed get/set access to stored settings with environment defaults

use std::collections::HashMap;
use std::sync::Arc;

use oncall_storage::StorageResult;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::catalog::SettingCatalog;
use crate::storage::{LiveSettingStore, SqliteLiveSettingStore};
use crate::types::{parse_env_value, value_as_text, LiveSetting};

/// Fallback values used when a setting has never been stored
#[derive(Debug, Clone, Default)]
pub struct SettingDefaults {
    values: HashMap<String, Value>,
}

impl SettingDefaults {
    /// Snapshot the process environment for every catalog name
    pub fn from_env(catalog: &SettingCatalog) -> Self {
        Self::from_lookup(catalog, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(catalog: &SettingCatalog, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = catalog
            .iter()
            .filter_map(|setting| {
                lookup(setting.name).map(|raw| (setting.name.to_string(), parse_env_value(&raw)))
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Read/write access to live settings
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct LiveSettings {
    store: Arc<dyn LiveSettingStore>,
    catalog: Arc<SettingCatalog>,
    defaults: SettingDefaults,
}

impl LiveSettings {
    pub fn new(store: Arc<dyn LiveSettingStore>, catalog: Arc<SettingCatalog>) -> Self {
        Self {
            store,
            catalog,
            defaults: SettingDefaults::default(),
        }
    }

    /// Proxy over the `live_settings` table in `pool`
    pub fn sqlite(pool: SqlitePool, catalog: Arc<SettingCatalog>) -> Self {
        Self::new(Arc::new(SqliteLiveSettingStore::new(pool)), catalog)
    }

    pub fn with_defaults(mut self, defaults: SettingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn catalog(&self) -> &SettingCatalog {
        &self.catalog
    }

    /// Known names resolve to their catalog spelling; anything else is kept as given
    pub fn canonical_name(&self, name: &str) -> String {
        self.catalog
            .get(name)
            .map(|setting| setting.name.to_string())
            .unwrap_or_else(|| name.to_string())
    }

    /// Stored value, then the configured default, then `None`
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> StorageResult<Option<Value>> {
        let name = self.canonical_name(name);

        if let Some(setting) = self.store.find_by_name(&name).await? {
            return Ok(Some(setting.value));
        }

        let fallback = self.defaults.get(&name).cloned();
        if fallback.is_some() {
            debug!("Using default value for {}", name);
        }
        Ok(fallback)
    }

    /// Like [`get`](Self::get), rendered as text; absent reads as the empty string
    pub async fn get_text(&self, name: &str) -> StorageResult<String> {
        Ok(self
            .get(name)
            .await?
            .map(|value| match value {
                Value::Null => String::new(),
                other => value_as_text(&other),
            })
            .unwrap_or_default())
    }

    pub async fn record(&self, name: &str) -> StorageResult<Option<LiveSetting>> {
        self.store.find_by_name(&self.canonical_name(name)).await
    }

    pub async fn records(&self) -> StorageResult<Vec<LiveSetting>> {
        self.store.list().await
    }

    /// Insert or overwrite `name`
    #[instrument(skip(self, value))]
    pub async fn set(&self, name: &str, value: Value) -> StorageResult<()> {
        self.set_with_error(name, value, None).await.map(|_| ())
    }

    /// Insert or overwrite `name`, recording its last validation result
    #[instrument(skip(self, value))]
    pub async fn set_with_error(
        &self,
        name: &str,
        value: Value,
        error: Option<String>,
    ) -> StorageResult<LiveSetting> {
        let name = self.canonical_name(name);
        debug!("Storing live setting {}", name);
        self.store.upsert(&name, &value, error).await
    }

    /// Record a validation result without touching the value
    pub async fn set_error(&self, name: &str, error: Option<String>) -> StorageResult<()> {
        self.store
            .set_error(&self.canonical_name(name), error)
            .await
    }

    /// Every setting name the engine recognizes, in catalog order
    pub fn list_known_names(&self) -> Vec<&'static str> {
        self.catalog.names()
    }
}
