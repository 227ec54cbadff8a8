// ABOUTME: Error types for live settings
// ABOUTME: Registry consistency failures, rejected values, and storage errors

use oncall_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Setting {0} is marked as validated but has no registered check")]
    MissingCheck(String),

    #[error("Check registered for unknown setting: {0}")]
    UnknownCheck(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {name}: {reason}")]
    Rejected { name: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
