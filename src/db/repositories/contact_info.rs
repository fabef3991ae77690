//! Contact info repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;
use crate::models::{ContactInfo, CreateContactInfoInput, UpdateContactInfoInput};

/// Contact info repository trait
#[async_trait]
pub trait ContactInfoRepository: Send + Sync {
    async fn create(&self, input: CreateContactInfoInput) -> Result<ContactInfo>;
    async fn get_by_id(&self, id: i64) -> Result<Option<ContactInfo>>;
    /// List all entries ordered for display
    async fn list(&self) -> Result<Vec<ContactInfo>>;
    /// List only entries shown on the public site
    async fn list_active(&self) -> Result<Vec<ContactInfo>>;
    async fn update(&self, id: i64, input: UpdateContactInfoInput) -> Result<ContactInfo>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based contact info repository implementation
pub struct SqlxContactInfoRepository {
    pool: DbPool,
}

impl SqlxContactInfoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn ContactInfoRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str =
    "id, kind, title, value, icon, active, display_order, created_at, updated_at";

#[async_trait]
impl ContactInfoRepository for SqlxContactInfoRepository {
    async fn create(&self, input: CreateContactInfoInput) -> Result<ContactInfo> {
        let mut entry = ContactInfo::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO contact_info (kind, title, value, icon, active, display_order,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.kind.as_db_str())
        .bind(&entry.title)
        .bind(&entry.value)
        .bind(&entry.icon)
        .bind(entry.active)
        .bind(entry.display_order)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create contact info"))?;

        entry.id = result.last_insert_rowid();
        Ok(entry)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactInfo>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM contact_info WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get contact info"))?;

        match row {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<ContactInfo>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM contact_info ORDER BY display_order, id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list contact info"))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn list_active(&self) -> Result<Vec<ContactInfo>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM contact_info WHERE active = 1 ORDER BY display_order, id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list contact info"))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn update(&self, id: i64, input: UpdateContactInfoInput) -> Result<ContactInfo> {
        let mut entry = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Contact info not found: {}", id))?;

        if let Some(kind) = input.kind {
            entry.kind = kind;
        }
        if let Some(title) = input.title {
            entry.title = title;
        }
        if let Some(value) = input.value {
            entry.value = value;
        }
        if let Some(icon) = input.icon {
            entry.icon = icon;
        }
        if let Some(active) = input.active {
            entry.active = active;
        }
        if let Some(display_order) = input.display_order {
            entry.display_order = display_order;
        }
        entry.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE contact_info
            SET kind = ?, title = ?, value = ?, icon = ?, active = ?, display_order = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(entry.kind.as_db_str())
        .bind(&entry.title)
        .bind(&entry.value)
        .bind(&entry.icon)
        .bind(entry.active)
        .bind(entry.display_order)
        .bind(entry.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update contact info"))?;

        Ok(entry)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contact_info WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete contact info"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete contact info: not found: {}", id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM contact_info")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count contact info"))?;
        Ok(row.get("count"))
    }
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<ContactInfo> {
    Ok(ContactInfo {
        id: row.get("id"),
        kind: row.get::<String, _>("kind").parse()?,
        title: row.get("title"),
        value: row.get("value"),
        icon: row.get("icon"),
        active: row.get("active"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::ContactInfoKind;

    async fn setup_test_repo() -> SqlxContactInfoRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxContactInfoRepository::new(pool)
    }

    fn sample_input(kind: ContactInfoKind, order: i32) -> CreateContactInfoInput {
        CreateContactInfoInput {
            kind,
            title: format!("{} entry", kind),
            value: "value".to_string(),
            icon: None,
            active: Some(true),
            display_order: Some(order),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input(ContactInfoKind::Phone, 1))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.kind, ContactInfoKind::Phone);
        assert_eq!(found.display_order, 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_display_order() {
        let repo = setup_test_repo().await;
        repo.create(sample_input(ContactInfoKind::Hours, 2)).await.unwrap();
        repo.create(sample_input(ContactInfoKind::Address, 0)).await.unwrap();
        repo.create(sample_input(ContactInfoKind::Email, 1)).await.unwrap();

        let entries = repo.list().await.unwrap();
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContactInfoKind::Address,
                ContactInfoKind::Email,
                ContactInfoKind::Hours
            ]
        );
    }

    #[tokio::test]
    async fn test_list_active_hides_inactive() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input(ContactInfoKind::Email, 0))
            .await
            .unwrap();
        repo.update(
            created.id,
            UpdateContactInfoInput {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(repo.list_active().await.unwrap().is_empty());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_an_error() {
        let repo = setup_test_repo().await;
        assert!(repo.delete(31337).await.is_err());
    }
}
