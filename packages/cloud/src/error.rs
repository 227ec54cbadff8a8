//! Cloud error types
use oncall_storage::StorageError;
use thiserror::Error;

/// Result type for cloud operations
pub type CloudResult<T> = Result<T, CloudError>;

/// Cloud connector errors. The display strings are shown to administrators
/// verbatim as validation results.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("GRAFANA_CLOUD_ONCALL_TOKEN is not set")]
    TokenNotSet,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Non-200 HTTP code. Got {0}")]
    UnexpectedStatus(u16),

    #[error("Unable to sync with cloud. Request exception {0}")]
    Request(String),

    #[error("Invalid response from cloud: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CloudError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<reqwest::Error> for CloudError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
