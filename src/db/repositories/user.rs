//! User repository
//!
//! Identity data only; credentials live with the external auth provider.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;
use crate::models::{CreateUserInput, UpdateUserInput, User};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: CreateUserInput) -> Result<User>;
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;
    /// Get user by email (unique)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, name, email, role, status, joined_at, last_login_at";

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, input: CreateUserInput) -> Result<User> {
        let mut user = User::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, role, status, joined_at, last_login_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_db_str())
        .bind(user.status.as_db_str())
        .bind(user.joined_at)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create user"))?;

        user.id = result.last_insert_rowid();
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to get user"))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get user"))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY joined_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list users"))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User> {
        let mut user = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("User not found: {}", id))?;

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(status) = input.status {
            user.status = status;
        }
        if let Some(last_login_at) = input.last_login_at {
            user.last_login_at = Some(last_login_at);
        }

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, role = ?, status = ?, last_login_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_db_str())
        .bind(user.status.as_db_str())
        .bind(user.last_login_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update user"))?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete user"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete user: not found: {}", id));
        }
        Ok(())
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: row.get::<String, _>("role").parse()?,
        status: row.get::<String, _>("status").parse()?,
        joined_at: row.get("joined_at"),
        last_login_at: row.get("last_login_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::{UserRole, UserStatus};

    async fn setup_test_repo() -> SqlxUserRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxUserRepository::new(pool)
    }

    fn sample_input(email: &str, role: UserRole) -> CreateUserInput {
        CreateUserInput {
            name: "Test User".to_string(),
            email: email.to_string(),
            role: Some(role),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input("a@example.com", UserRole::Instructor))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@example.com");
        assert_eq!(found.role, UserRole::Instructor);
        assert_eq!(found.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("who@example.com", UserRole::Student))
            .await
            .unwrap();

        let found = repo.get_by_email("who@example.com").await.unwrap();
        assert!(found.is_some());
        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_an_error() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("dup@example.com", UserRole::Student))
            .await
            .unwrap();
        let result = repo
            .create(sample_input("dup@example.com", UserRole::Editor))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_role_and_status() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input("u@example.com", UserRole::Student))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUserInput {
                    role: Some(UserRole::Admin),
                    status: Some(UserStatus::Suspended),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_admin());
        assert_eq!(updated.status, UserStatus::Suspended);
    }

    #[tokio::test]
    async fn test_delete_missing_is_an_error() {
        let repo = setup_test_repo().await;
        assert!(repo.delete(5150).await.is_err());
    }
}
