// ABOUTME: Application context for CLI commands
// ABOUTME: Opens the database and wires live settings to the standard validator

use std::sync::Arc;

use anyhow::Context;
use oncall_core::EngineConfig;
use oncall_settings::{
    LiveSettings, LiveSettingsService, Providers, SettingCatalog, SettingDefaults,
    SettingValidator,
};
use oncall_storage::Database;
use tracing::info;

pub struct AppContext {
    pub config: EngineConfig,
    pub db: Database,
    pub service: LiveSettingsService,
}

impl AppContext {
    /// Open the configured database and build the settings service
    pub async fn open(config: EngineConfig) -> anyhow::Result<Self> {
        let db = Database::open(&config.database_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to open settings database at {}",
                    config.database_path.display()
                )
            })?;
        info!("Using settings database {}", config.database_path.display());

        Self::with_database(config, db)
    }

    pub fn with_database(config: EngineConfig, db: Database) -> anyhow::Result<Self> {
        let catalog = SettingCatalog::default();
        let defaults = if config.env_fallback {
            SettingDefaults::from_env(&catalog)
        } else {
            SettingDefaults::default()
        };

        let settings =
            LiveSettings::sqlite(db.pool().clone(), Arc::new(catalog)).with_defaults(defaults);
        let providers = Providers::from_config(&config, db.pool().clone())
            .context("Failed to build HTTP client")?;
        let validator = SettingValidator::standard(settings, &providers)?;

        Ok(Self {
            config,
            db,
            service: LiveSettingsService::new(validator),
        })
    }
}
