//! Service repository
//!
//! Database operations for services.
//!
//! This module provides:
//! - `ServiceRepository` trait defining the interface for service data access
//! - `SqlxServiceRepository` implementing the trait against SQLite

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::{decode_string_list, encode_string_list, storage_err};
use crate::db::DbPool;
use crate::models::{CreateServiceInput, Service, UpdateServiceInput};

/// Service repository trait
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Create a new service
    async fn create(&self, input: CreateServiceInput) -> Result<Service>;

    /// Get service by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Service>>;

    /// List all services
    async fn list(&self) -> Result<Vec<Service>>;

    /// List services visible on the public site
    async fn list_active(&self) -> Result<Vec<Service>>;

    /// Update a service, applying only the fields present in the input
    async fn update(&self, id: i64, input: UpdateServiceInput) -> Result<Service>;

    /// Delete a service. Deleting a missing ID is an error.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Count all services
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based service repository implementation
pub struct SqlxServiceRepository {
    pool: DbPool,
}

impl SqlxServiceRepository {
    /// Create a new SQLx service repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DbPool) -> Arc<dyn ServiceRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, title, description, long_description, icon, features, category, \
     status, basic_price, premium_price, enterprise_price, popularity, clients, rating, \
     created_at, updated_at";

#[async_trait]
impl ServiceRepository for SqlxServiceRepository {
    async fn create(&self, input: CreateServiceInput) -> Result<Service> {
        let mut service = Service::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO services (title, description, long_description, icon, features, category,
                status, basic_price, premium_price, enterprise_price, popularity, clients, rating,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.long_description)
        .bind(&service.icon)
        .bind(encode_string_list(&service.features))
        .bind(&service.category)
        .bind(service.status.as_db_str())
        .bind(service.basic_price)
        .bind(service.premium_price)
        .bind(service.enterprise_price)
        .bind(service.popularity)
        .bind(service.clients)
        .bind(service.rating)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create service"))?;

        service.id = result.last_insert_rowid();
        Ok(service)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Service>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM services WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get service"))?;

        match row {
            Some(row) => Ok(Some(row_to_service(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM services ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list services"))?;

        rows.iter().map(row_to_service).collect()
    }

    async fn list_active(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM services WHERE status = 'ACTIVE' ORDER BY popularity DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list services"))?;

        rows.iter().map(row_to_service).collect()
    }

    async fn update(&self, id: i64, input: UpdateServiceInput) -> Result<Service> {
        let mut service = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Service not found: {}", id))?;

        if let Some(title) = input.title {
            service.title = title;
        }
        if let Some(description) = input.description {
            service.description = description;
        }
        if let Some(long_description) = input.long_description {
            service.long_description = long_description;
        }
        if let Some(icon) = input.icon {
            service.icon = icon;
        }
        if let Some(features) = input.features {
            service.features = features;
        }
        if let Some(category) = input.category {
            service.category = category;
        }
        if let Some(status) = input.status {
            service.status = status;
        }
        if let Some(basic_price) = input.basic_price {
            service.basic_price = basic_price;
        }
        if let Some(premium_price) = input.premium_price {
            service.premium_price = premium_price;
        }
        if let Some(enterprise_price) = input.enterprise_price {
            service.enterprise_price = enterprise_price;
        }
        if let Some(popularity) = input.popularity {
            service.popularity = popularity;
        }
        if let Some(clients) = input.clients {
            service.clients = clients;
        }
        if let Some(rating) = input.rating {
            service.rating = rating;
        }
        service.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE services
            SET title = ?, description = ?, long_description = ?, icon = ?, features = ?,
                category = ?, status = ?, basic_price = ?, premium_price = ?,
                enterprise_price = ?, popularity = ?, clients = ?, rating = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.long_description)
        .bind(&service.icon)
        .bind(encode_string_list(&service.features))
        .bind(&service.category)
        .bind(service.status.as_db_str())
        .bind(service.basic_price)
        .bind(service.premium_price)
        .bind(service.enterprise_price)
        .bind(service.popularity)
        .bind(service.clients)
        .bind(service.rating)
        .bind(service.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update service"))?;

        Ok(service)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete service"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete service: not found: {}", id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM services")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count services"))?;
        Ok(row.get("count"))
    }
}

fn row_to_service(row: &sqlx::sqlite::SqliteRow) -> Result<Service> {
    Ok(Service {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        long_description: row.get("long_description"),
        icon: row.get("icon"),
        features: decode_string_list(&row.get::<String, _>("features")),
        category: row.get("category"),
        status: row.get::<String, _>("status").parse()?,
        basic_price: row.get("basic_price"),
        premium_price: row.get("premium_price"),
        enterprise_price: row.get("enterprise_price"),
        popularity: row.get("popularity"),
        clients: row.get("clients"),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::ServiceStatus;

    async fn setup_test_repo() -> SqlxServiceRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxServiceRepository::new(pool)
    }

    fn sample_input(title: &str) -> CreateServiceInput {
        CreateServiceInput {
            title: title.to_string(),
            description: "Short description".to_string(),
            long_description: Some("Long description".to_string()),
            icon: Some("cloud".to_string()),
            features: vec!["Feature A".to_string(), "Feature B".to_string()],
            category: "consulting".to_string(),
            status: Some(ServiceStatus::Active),
            basic_price: 5000.0,
            premium_price: 15000.0,
            enterprise_price: 50000.0,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_service() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(sample_input("AI Consulting"))
            .await
            .expect("Failed to create service");
        assert!(created.id > 0);

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get service")
            .expect("Service not found");

        assert_eq!(found.title, "AI Consulting");
        assert_eq!(found.status, ServiceStatus::Active);
        assert_eq!(found.features, vec!["Feature A", "Feature B"]);
        assert_eq!(found.basic_price, 5000.0);
        assert_eq!(found.premium_price, 15000.0);
        assert_eq!(found.enterprise_price, 50000.0);
    }

    #[tokio::test]
    async fn test_get_service_not_found() {
        let repo = setup_test_repo().await;
        let found = repo.get_by_id(99999).await.expect("Failed to get service");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_services() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("One")).await.unwrap();
        repo.create(sample_input("Two")).await.unwrap();

        let services = repo.list().await.expect("Failed to list services");
        assert_eq!(services.len(), 2);
    }

    #[tokio::test]
    async fn test_list_active_filters_drafts() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("Active")).await.unwrap();
        let mut draft = sample_input("Draft");
        draft.status = Some(ServiceStatus::Draft);
        repo.create(draft).await.unwrap();

        let active = repo.list_active().await.expect("Failed to list services");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Active");
    }

    #[tokio::test]
    async fn test_update_applies_partial_input() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input("Before")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateServiceInput {
                    title: Some("After".to_string()),
                    status: Some(ServiceStatus::Inactive),
                    basic_price: Some(6000.0),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update service");

        assert_eq!(updated.title, "After");
        assert_eq!(updated.status, ServiceStatus::Inactive);
        assert_eq!(updated.basic_price, 6000.0);
        // Untouched fields survive
        assert_eq!(updated.premium_price, 15000.0);
        assert_eq!(updated.description, "Short description");

        let reread = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reread.title, "After");
    }

    #[tokio::test]
    async fn test_update_missing_service_is_an_error() {
        let repo = setup_test_repo().await;
        let result = repo.update(4242, UpdateServiceInput::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_service() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input("Doomed")).await.unwrap();

        repo.delete(created.id).await.expect("Failed to delete");
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_service_is_an_error() {
        let repo = setup_test_repo().await;
        let result = repo.delete(4242).await;
        assert!(result.is_err(), "deleting a missing id must surface an error");
    }

    #[tokio::test]
    async fn test_count() {
        let repo = setup_test_repo().await;
        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create(sample_input("One")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
