//! Settings repository
//!
//! Key-value storage for back-office preferences, currently the persisted
//! export defaults.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;

/// A setting key-value pair
#[derive(Debug, Clone)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for settings operations
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get a single setting by key
    async fn get(&self, key: &str) -> Result<Option<Setting>>;

    /// Set a single setting (insert or overwrite)
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a setting; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

/// SQLx-based settings repository
pub struct SqlxSettingsRepository {
    pool: DbPool,
}

impl SqlxSettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn SettingsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SettingsRepository for SqlxSettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<Setting>> {
        let row = sqlx::query("SELECT key, value, updated_at FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to get setting"))?;

        Ok(row.map(|row| Setting {
            key: row.get("key"),
            value: row.get("value"),
            updated_at: row.get("updated_at"),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to set setting"))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete setting"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxSettingsRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxSettingsRepository::new(pool)
    }

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let repo = setup_test_repo().await;

        assert!(repo.get("export").await.unwrap().is_none());

        repo.set("export", r#"{"format":"json"}"#).await.unwrap();
        let setting = repo.get("export").await.unwrap().unwrap();
        assert_eq!(setting.value, r#"{"format":"json"}"#);

        repo.set("export", r#"{"format":"csv"}"#).await.unwrap();
        let setting = repo.get("export").await.unwrap().unwrap();
        assert_eq!(setting.value, r#"{"format":"csv"}"#);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = setup_test_repo().await;
        repo.set("k", "v").await.unwrap();
        repo.delete("k").await.unwrap();
        repo.delete("k").await.unwrap();
        assert!(repo.get("k").await.unwrap().is_none());
    }
}
