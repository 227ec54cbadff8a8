//! Persistence of the single cloud connector record

use chrono::{DateTime, Utc};
use oncall_storage::StorageError;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// The last successful cloud sync
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CloudConnection {
    pub cloud_url: String,
    pub synced_at: String,
}

pub struct CloudConnectorStorage {
    pool: SqlitePool,
}

impl CloudConnectorStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current connection, if a sync ever succeeded
    pub async fn get(&self) -> Result<Option<CloudConnection>, StorageError> {
        let row = sqlx::query("SELECT cloud_url, synced_at FROM cloud_connector WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|row| {
            Ok(CloudConnection {
                cloud_url: row.try_get("cloud_url").map_err(StorageError::Sqlx)?,
                synced_at: row.try_get("synced_at").map_err(StorageError::Sqlx)?,
            })
        })
        .transpose()
    }

    /// Record a successful sync
    pub async fn save(&self, cloud_url: &str) -> Result<CloudConnection, StorageError> {
        let synced_at = timestamp(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO cloud_connector (id, cloud_url, synced_at)
            VALUES (1, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                cloud_url = excluded.cloud_url,
                synced_at = excluded.synced_at
            "#,
        )
        .bind(cloud_url)
        .bind(&synced_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(CloudConnection {
            cloud_url: cloud_url.to_string(),
            synced_at,
        })
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
