//! Global office repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;
use crate::models::{CreateGlobalOfficeInput, GlobalOffice, UpdateGlobalOfficeInput};

/// Global office repository trait
#[async_trait]
pub trait GlobalOfficeRepository: Send + Sync {
    async fn create(&self, input: CreateGlobalOfficeInput) -> Result<GlobalOffice>;
    async fn get_by_id(&self, id: i64) -> Result<Option<GlobalOffice>>;
    /// List all offices, headquarters first
    async fn list(&self) -> Result<Vec<GlobalOffice>>;
    async fn update(&self, id: i64, input: UpdateGlobalOfficeInput) -> Result<GlobalOffice>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based global office repository implementation
pub struct SqlxGlobalOfficeRepository {
    pool: DbPool,
}

impl SqlxGlobalOfficeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn GlobalOfficeRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, city, country, address, postal_code, phone, email, latitude, \
     longitude, is_headquarters, active, working_hours, created_at, updated_at";

#[async_trait]
impl GlobalOfficeRepository for SqlxGlobalOfficeRepository {
    async fn create(&self, input: CreateGlobalOfficeInput) -> Result<GlobalOffice> {
        let mut office = GlobalOffice::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO global_offices (city, country, address, postal_code, phone, email,
                latitude, longitude, is_headquarters, active, working_hours, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&office.city)
        .bind(&office.country)
        .bind(&office.address)
        .bind(&office.postal_code)
        .bind(&office.phone)
        .bind(&office.email)
        .bind(office.latitude)
        .bind(office.longitude)
        .bind(office.is_headquarters)
        .bind(office.active)
        .bind(&office.working_hours)
        .bind(office.created_at)
        .bind(office.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create global office"))?;

        office.id = result.last_insert_rowid();
        Ok(office)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<GlobalOffice>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM global_offices WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get global office"))?;

        match row {
            Some(row) => Ok(Some(row_to_office(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<GlobalOffice>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM global_offices ORDER BY is_headquarters DESC, city",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list global offices"))?;

        rows.iter().map(row_to_office).collect()
    }

    async fn update(&self, id: i64, input: UpdateGlobalOfficeInput) -> Result<GlobalOffice> {
        let mut office = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Global office not found: {}", id))?;

        if let Some(city) = input.city {
            office.city = city;
        }
        if let Some(country) = input.country {
            office.country = country;
        }
        if let Some(address) = input.address {
            office.address = address;
        }
        if let Some(postal_code) = input.postal_code {
            office.postal_code = postal_code;
        }
        if let Some(phone) = input.phone {
            office.phone = phone;
        }
        if let Some(email) = input.email {
            office.email = email;
        }
        if let Some(latitude) = input.latitude {
            office.latitude = latitude;
        }
        if let Some(longitude) = input.longitude {
            office.longitude = longitude;
        }
        if let Some(is_headquarters) = input.is_headquarters {
            office.is_headquarters = is_headquarters;
        }
        if let Some(active) = input.active {
            office.active = active;
        }
        if let Some(working_hours) = input.working_hours {
            office.working_hours = working_hours;
        }
        office.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE global_offices
            SET city = ?, country = ?, address = ?, postal_code = ?, phone = ?, email = ?,
                latitude = ?, longitude = ?, is_headquarters = ?, active = ?, working_hours = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&office.city)
        .bind(&office.country)
        .bind(&office.address)
        .bind(&office.postal_code)
        .bind(&office.phone)
        .bind(&office.email)
        .bind(office.latitude)
        .bind(office.longitude)
        .bind(office.is_headquarters)
        .bind(office.active)
        .bind(&office.working_hours)
        .bind(office.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update global office"))?;

        Ok(office)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM global_offices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete global office"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete global office: not found: {}", id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM global_offices")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("Failed to count global offices"))?;
        Ok(row.get("count"))
    }
}

fn row_to_office(row: &sqlx::sqlite::SqliteRow) -> Result<GlobalOffice> {
    Ok(GlobalOffice {
        id: row.get("id"),
        city: row.get("city"),
        country: row.get("country"),
        address: row.get("address"),
        postal_code: row.get("postal_code"),
        phone: row.get("phone"),
        email: row.get("email"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        is_headquarters: row.get("is_headquarters"),
        active: row.get("active"),
        working_hours: row.get("working_hours"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxGlobalOfficeRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxGlobalOfficeRepository::new(pool)
    }

    fn sample_input(city: &str, hq: bool) -> CreateGlobalOfficeInput {
        CreateGlobalOfficeInput {
            city: city.to_string(),
            country: "Testland".to_string(),
            address: "1 Main St".to_string(),
            postal_code: Some("0000".to_string()),
            phone: None,
            email: None,
            latitude: Some(1.5),
            longitude: Some(2.5),
            is_headquarters: Some(hq),
            active: Some(true),
            working_hours: Some("9-5".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_office() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input("Lisbon", false)).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.city, "Lisbon");
        assert_eq!(found.latitude, Some(1.5));
        assert!(found.has_coordinates());
    }

    #[tokio::test]
    async fn test_list_puts_headquarters_first() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("Aberdeen", false)).await.unwrap();
        repo.create(sample_input("Zagreb", true)).await.unwrap();

        let offices = repo.list().await.unwrap();
        assert_eq!(offices[0].city, "Zagreb");
    }

    #[tokio::test]
    async fn test_update_can_clear_optional_fields() {
        let repo = setup_test_repo().await;
        let created = repo.create(sample_input("Oslo", false)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateGlobalOfficeInput {
                    latitude: Some(None),
                    longitude: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.latitude.is_none());
        assert!(!updated.has_coordinates());
    }

    #[tokio::test]
    async fn test_delete_missing_is_an_error() {
        let repo = setup_test_repo().await;
        assert!(repo.delete(7).await.is_err());
    }
}
