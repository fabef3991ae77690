//! Course repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::storage_err;
use crate::db::DbPool;
use crate::models::{Course, CreateCourseInput, UpdateCourseInput};

/// Course repository trait
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, input: CreateCourseInput) -> Result<Course>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list(&self) -> Result<Vec<Course>>;
    /// List courses visible on the public site
    async fn list_published(&self) -> Result<Vec<Course>>;
    async fn update(&self, id: i64, input: UpdateCourseInput) -> Result<Course>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based course repository implementation
pub struct SqlxCourseRepository {
    pool: DbPool,
}

impl SqlxCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn CourseRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, title, description, instructor_id, category, level, price, \
     discount_price, rating, enrolled_count, published, created_at, updated_at";

#[async_trait]
impl CourseRepository for SqlxCourseRepository {
    async fn create(&self, input: CreateCourseInput) -> Result<Course> {
        let mut course = Course::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO courses (title, description, instructor_id, category, level, price,
                discount_price, rating, enrolled_count, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.instructor_id)
        .bind(&course.category)
        .bind(course.level.as_db_str())
        .bind(course.price)
        .bind(course.discount_price)
        .bind(course.rating)
        .bind(course.enrolled_count)
        .bind(course.published)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create course"))?;

        course.id = result.last_insert_rowid();
        Ok(course)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Course>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM courses WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err("Failed to get course"))?;

        match row {
            Some(row) => Ok(Some(row_to_course(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM courses ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list courses"))?;

        rows.iter().map(row_to_course).collect()
    }

    async fn list_published(&self) -> Result<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM courses WHERE published = 1 ORDER BY rating DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list courses"))?;

        rows.iter().map(row_to_course).collect()
    }

    async fn update(&self, id: i64, input: UpdateCourseInput) -> Result<Course> {
        let mut course = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Course not found: {}", id))?;

        if let Some(title) = input.title {
            course.title = title;
        }
        if let Some(description) = input.description {
            course.description = description;
        }
        if let Some(instructor_id) = input.instructor_id {
            course.instructor_id = instructor_id;
        }
        if let Some(category) = input.category {
            course.category = category;
        }
        if let Some(level) = input.level {
            course.level = level;
        }
        if let Some(price) = input.price {
            course.price = price;
        }
        if let Some(discount_price) = input.discount_price {
            course.discount_price = discount_price;
        }
        if let Some(rating) = input.rating {
            course.rating = rating;
        }
        if let Some(enrolled_count) = input.enrolled_count {
            course.enrolled_count = enrolled_count;
        }
        if let Some(published) = input.published {
            course.published = published;
        }
        course.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE courses
            SET title = ?, description = ?, instructor_id = ?, category = ?, level = ?,
                price = ?, discount_price = ?, rating = ?, enrolled_count = ?, published = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.instructor_id)
        .bind(&course.category)
        .bind(course.level.as_db_str())
        .bind(course.price)
        .bind(course.discount_price)
        .bind(course.rating)
        .bind(course.enrolled_count)
        .bind(course.published)
        .bind(course.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update course"))?;

        Ok(course)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete course"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete course: not found: {}", id));
        }
        Ok(())
    }
}

fn row_to_course(row: &sqlx::sqlite::SqliteRow) -> Result<Course> {
    Ok(Course {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        instructor_id: row.get("instructor_id"),
        category: row.get("category"),
        level: row.get::<String, _>("level").parse()?,
        price: row.get("price"),
        discount_price: row.get("discount_price"),
        rating: row.get("rating"),
        enrolled_count: row.get("enrolled_count"),
        published: row.get("published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations, DbPool};
    use crate::models::{CourseLevel, CreateUserInput, UserRole};

    async fn setup() -> (DbPool, SqlxCourseRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        (pool.clone(), SqlxCourseRepository::new(pool))
    }

    fn sample_input(title: &str, published: bool) -> CreateCourseInput {
        CreateCourseInput {
            title: title.to_string(),
            description: "A course".to_string(),
            instructor_id: None,
            category: "ai".to_string(),
            level: Some(CourseLevel::Intermediate),
            price: 499.0,
            discount_price: Some(299.0),
            published: Some(published),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_course() {
        let (_pool, repo) = setup().await;
        let created = repo.create(sample_input("LLM Ops", true)).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "LLM Ops");
        assert_eq!(found.level, CourseLevel::Intermediate);
        assert_eq!(found.effective_price(), 299.0);
    }

    #[tokio::test]
    async fn test_course_with_instructor_reference() {
        let (pool, repo) = setup().await;
        let users = SqlxUserRepository::new(pool);
        let instructor = users
            .create(CreateUserInput {
                name: "Dr. Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Some(UserRole::Instructor),
            })
            .await
            .unwrap();

        let mut input = sample_input("Graph ML", true);
        input.instructor_id = Some(instructor.id);
        let course = repo.create(input).await.unwrap();

        assert_eq!(course.instructor_id, Some(instructor.id));
    }

    #[tokio::test]
    async fn test_list_published_filters_unpublished() {
        let (_pool, repo) = setup().await;
        repo.create(sample_input("Visible", true)).await.unwrap();
        repo.create(sample_input("Hidden", false)).await.unwrap();

        let published = repo.list_published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Visible");
    }

    #[tokio::test]
    async fn test_delete_missing_is_an_error() {
        let (_pool, repo) = setup().await;
        assert!(repo.delete(123).await.is_err());
    }
}
