//! API response models for the Grafana Cloud OnCall info endpoint

use serde::Deserialize;

/// Path of the info endpoint, relative to the cloud API URL
pub const INFO_PATH: &str = "api/v1/info/";

/// Info endpoint response; only the public URL of the cloud stack is used
#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    pub url: String,
    #[serde(default)]
    pub version: Option<String>,
}
