//! Contact message repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;
use crate::models::{ContactMessage, CreateContactMessageInput, UpdateContactMessageInput};

/// Contact message repository trait
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Create a new contact message
    async fn create(&self, input: CreateContactMessageInput) -> Result<ContactMessage>;

    /// Get message by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>>;

    /// List all messages, newest first
    async fn list(&self) -> Result<Vec<ContactMessage>>;

    /// Update a message, applying only the fields present in the input
    async fn update(&self, id: i64, input: UpdateContactMessageInput) -> Result<ContactMessage>;

    /// Delete a message. Deleting a missing ID is an error.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based contact message repository implementation
pub struct SqlxContactMessageRepository {
    pool: DbPool,
}

impl SqlxContactMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn ContactMessageRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, name, email, phone, subject, message, status, priority, reply, \
     replied_at, created_at, updated_at";

#[async_trait]
impl ContactMessageRepository for SqlxContactMessageRepository {
    async fn create(&self, input: CreateContactMessageInput) -> Result<ContactMessage> {
        let mut message = ContactMessage::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, phone, subject, message, status, priority,
                reply, replied_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.status.as_db_str())
        .bind(message.priority.as_db_str())
        .bind(&message.reply)
        .bind(message.replied_at)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create contact message"))?;

        message.id = result.last_insert_rowid();
        Ok(message)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM contact_messages WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get contact message"))?;

        match row {
            Some(row) => Ok(Some(row_to_message(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list contact messages"))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn update(&self, id: i64, input: UpdateContactMessageInput) -> Result<ContactMessage> {
        let mut message = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Contact message not found: {}", id))?;

        // Status is a triage label: any value may be set at any time.
        if let Some(status) = input.status {
            message.status = status;
        }
        if let Some(priority) = input.priority {
            message.priority = priority;
        }
        if let Some(reply) = input.reply {
            message.reply = Some(reply);
            message.replied_at = Some(Utc::now());
        }
        message.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE contact_messages
            SET status = ?, priority = ?, reply = ?, replied_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(message.status.as_db_str())
        .bind(message.priority.as_db_str())
        .bind(&message.reply)
        .bind(message.replied_at)
        .bind(message.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update contact message"))?;

        Ok(message)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete contact message"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete contact message: not found: {}", id));
        }
        Ok(())
    }
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        subject: row.get("subject"),
        message: row.get("message"),
        status: row.get::<String, _>("status").parse()?,
        priority: row.get::<String, _>("priority").parse()?,
        reply: row.get("reply"),
        replied_at: row.get("replied_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::{MessagePriority, MessageStatus};

    async fn setup_test_repo() -> SqlxContactMessageRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxContactMessageRepository::new(pool)
    }

    fn sample_input() -> CreateContactMessageInput {
        CreateContactMessageInput {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            phone: Some("+1 555 0101".to_string()),
            subject: "Question".to_string(),
            message: "How do I enroll?".to_string(),
            priority: Some(MessagePriority::High),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_message() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input()).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "jordan@example.com");
        assert_eq!(found.status, MessageStatus::New);
        assert_eq!(found.priority, MessagePriority::High);
        assert!(found.reply.is_none());
    }

    #[tokio::test]
    async fn test_reply_stamps_replied_at() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input()).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateContactMessageInput {
                    status: Some(MessageStatus::Replied),
                    reply: Some("You can enroll from the courses page.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, MessageStatus::Replied);
        assert!(updated.replied_at.is_some());
        assert!(updated.has_reply());
    }

    #[tokio::test]
    async fn test_any_status_is_settable() {
        // No transition graph: archived can go straight back to new.
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input()).await.unwrap();

        for status in [
            MessageStatus::Archived,
            MessageStatus::New,
            MessageStatus::Read,
        ] {
            let updated = repo
                .update(
                    created.id,
                    UpdateContactMessageInput {
                        status: Some(status),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn test_delete_missing_message_is_an_error() {
        let repo = setup_test_repo().await;
        assert!(repo.delete(999).await.is_err());
    }
}
