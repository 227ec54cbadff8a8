// ABOUTME: Storage operations for live settings
// ABOUTME: Store trait and its SQLite implementation (lookup, upsert, listing)

use async_trait::async_trait;
use chrono::Utc;
use oncall_storage::{StorageError, StorageResult};
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::LiveSetting;

/// Backing store for live settings
#[async_trait]
pub trait LiveSettingStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<LiveSetting>>;

    /// Insert or overwrite a setting, replacing its recorded error
    async fn upsert(
        &self,
        name: &str,
        value: &Value,
        error: Option<String>,
    ) -> StorageResult<LiveSetting>;

    /// Replace the recorded error without touching the value
    async fn set_error(&self, name: &str, error: Option<String>) -> StorageResult<()>;

    async fn list(&self) -> StorageResult<Vec<LiveSetting>>;
}

pub struct SqliteLiveSettingStore {
    pool: SqlitePool,
}

impl SqliteLiveSettingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Helper to convert row to LiveSetting
    fn row_to_setting(row: sqlx::sqlite::SqliteRow) -> StorageResult<LiveSetting> {
        let raw: Option<String> = row.try_get("value").map_err(StorageError::Sqlx)?;
        let value = match raw {
            Some(text) => serde_json::from_str(&text)?,
            None => Value::Null,
        };

        Ok(LiveSetting {
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            value,
            error: row.try_get("error").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[async_trait]
impl LiveSettingStore for SqliteLiveSettingStore {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<LiveSetting>> {
        debug!("Looking up live setting {}", name);

        let row = sqlx::query(
            "SELECT name, value, error, created_at, updated_at FROM live_settings WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        row.map(Self::row_to_setting).transpose()
    }

    async fn upsert(
        &self,
        name: &str,
        value: &Value,
        error: Option<String>,
    ) -> StorageResult<LiveSetting> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "Setting name cannot be empty".to_string(),
            ));
        }

        debug!("Upserting live setting {}", name);

        let encoded = serde_json::to_string(value)?;
        let timestamp = now();

        let row = sqlx::query(
            r#"
            INSERT INTO live_settings (name, value, error, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                error = excluded.error,
                updated_at = excluded.updated_at
            RETURNING name, value, error, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(encoded)
        .bind(error)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Self::row_to_setting(row)
    }

    async fn set_error(&self, name: &str, error: Option<String>) -> StorageResult<()> {
        sqlx::query("UPDATE live_settings SET error = ? WHERE name = ?")
            .bind(error)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<LiveSetting>> {
        let rows = sqlx::query(
            "SELECT name, value, error, created_at, updated_at FROM live_settings ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.into_iter().map(Self::row_to_setting).collect()
    }
}
