use reqwest::{Client, StatusCode};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::api::{InfoResponse, INFO_PATH};
use crate::error::{CloudError, CloudResult};
use crate::storage::{CloudConnection, CloudConnectorStorage};

/// Connects this engine to Grafana Cloud OnCall
pub struct CloudConnector {
    http_client: Client,
    api_url: String,
    storage: CloudConnectorStorage,
}

impl CloudConnector {
    pub fn new(http_client: Client, api_url: impl Into<String>, pool: SqlitePool) -> Self {
        Self {
            http_client,
            api_url: api_url.into(),
            storage: CloudConnectorStorage::new(pool),
        }
    }

    /// Verify `token` against the cloud info endpoint and record the cloud URL.
    ///
    /// 403 means the cloud rejected the token; any other non-200 status and
    /// any transport failure are reported with their own messages.
    #[instrument(skip(self, token))]
    pub async fn sync_with_cloud(&self, token: &str) -> CloudResult<CloudConnection> {
        if token.trim().is_empty() {
            return Err(CloudError::TokenNotSet);
        }

        let info_url = oncall_core::engine_url(&self.api_url, INFO_PATH)
            .map_err(|e| CloudError::config(e.to_string()))?;

        debug!("Syncing with cloud at {}", info_url);

        let response = self
            .http_client
            .get(&info_url)
            .header("Authorization", token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let info = response
                    .json::<InfoResponse>()
                    .await
                    .map_err(|e| CloudError::InvalidResponse(e.to_string()))?;

                let connection = self.storage.save(&info.url).await?;
                info!("Synced with cloud, stack URL {}", connection.cloud_url);
                Ok(connection)
            }
            StatusCode::FORBIDDEN => {
                warn!("Cloud rejected the OnCall token");
                Err(CloudError::InvalidToken)
            }
            status => {
                warn!("Cloud sync failed with status {}", status);
                Err(CloudError::UnexpectedStatus(status.as_u16()))
            }
        }
    }
}
