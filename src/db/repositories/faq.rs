//! FAQ repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::{decode_string_list, encode_string_list, storage_err};
use crate::db::DbPool;
use crate::models::{CreateFaqInput, Faq, UpdateFaqInput};

/// FAQ repository trait
#[async_trait]
pub trait FaqRepository: Send + Sync {
    async fn create(&self, input: CreateFaqInput) -> Result<Faq>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Faq>>;
    /// List all entries ordered for display
    async fn list(&self) -> Result<Vec<Faq>>;
    /// List only entries shown on the public site
    async fn list_active(&self) -> Result<Vec<Faq>>;
    async fn update(&self, id: i64, input: UpdateFaqInput) -> Result<Faq>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based FAQ repository implementation
pub struct SqlxFaqRepository {
    pool: DbPool,
}

impl SqlxFaqRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn FaqRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str =
    "id, question, answer, category, tags, display_order, active, created_at, updated_at";

#[async_trait]
impl FaqRepository for SqlxFaqRepository {
    async fn create(&self, input: CreateFaqInput) -> Result<Faq> {
        let mut faq = Faq::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO faqs (question, answer, category, tags, display_order, active,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(&faq.category)
        .bind(encode_string_list(&faq.tags))
        .bind(faq.display_order)
        .bind(faq.active)
        .bind(faq.created_at)
        .bind(faq.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create FAQ"))?;

        faq.id = result.last_insert_rowid();
        Ok(faq)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Faq>> {
        let row = sqlx::query(&format!("SELECT {} FROM faqs WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to get FAQ"))?;

        match row {
            Some(row) => Ok(Some(row_to_faq(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Faq>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM faqs ORDER BY category, display_order, id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list FAQs"))?;

        rows.iter().map(row_to_faq).collect()
    }

    async fn list_active(&self) -> Result<Vec<Faq>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM faqs WHERE active = 1 ORDER BY category, display_order, id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list FAQs"))?;

        rows.iter().map(row_to_faq).collect()
    }

    async fn update(&self, id: i64, input: UpdateFaqInput) -> Result<Faq> {
        let mut faq = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("FAQ not found: {}", id))?;

        if let Some(question) = input.question {
            faq.question = question;
        }
        if let Some(answer) = input.answer {
            faq.answer = answer;
        }
        if let Some(category) = input.category {
            faq.category = category;
        }
        if let Some(tags) = input.tags {
            faq.tags = tags;
        }
        if let Some(display_order) = input.display_order {
            faq.display_order = display_order;
        }
        if let Some(active) = input.active {
            faq.active = active;
        }
        faq.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE faqs
            SET question = ?, answer = ?, category = ?, tags = ?, display_order = ?, active = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(&faq.category)
        .bind(encode_string_list(&faq.tags))
        .bind(faq.display_order)
        .bind(faq.active)
        .bind(faq.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update FAQ"))?;

        Ok(faq)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete FAQ"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete FAQ: not found: {}", id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM faqs")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count FAQs"))?;
        Ok(row.get("count"))
    }
}

fn row_to_faq(row: &sqlx::sqlite::SqliteRow) -> Result<Faq> {
    Ok(Faq {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        tags: decode_string_list(&row.get::<String, _>("tags")),
        display_order: row.get("display_order"),
        active: row.get("active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
