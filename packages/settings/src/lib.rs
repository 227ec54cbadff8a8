// ABOUTME: Live settings module
// ABOUTME: Runtime configuration with database persistence and external validation

pub mod catalog;
pub mod checks;
pub mod error;
pub mod proxy;
pub mod service;
pub mod storage;
pub mod types;
pub mod validation;

pub use catalog::{names, KnownSetting, SettingCatalog, Validation};
pub use checks::{
    check_slack_redirect_host, check_twilio_number, standard_checks, Providers,
    HTTPS_REQUIRED_ERROR, PHONE_FORMAT_ERROR,
};
pub use error::SettingsError;
pub use proxy::{LiveSettings, SettingDefaults};
pub use service::LiveSettingsService;
pub use storage::{LiveSettingStore, SqliteLiveSettingStore};
pub use types::*;
pub use validation::{
    prettify_telegram_error, prettify_twilio_error, SettingCheck, SettingValidator,
    ValidatorBuilder, EMPTY_ERROR,
};
