//! Job repository

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use super::{decode_string_list, encode_string_list, storage_err};
use crate::db::DbPool;
use crate::models::{CreateJobInput, Job, UpdateJobInput};

/// Job repository trait
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, input: CreateJobInput) -> Result<Job>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Job>>;
    async fn list(&self) -> Result<Vec<Job>>;
    /// List postings accepting applications
    async fn list_open(&self) -> Result<Vec<Job>>;
    async fn update(&self, id: i64, input: UpdateJobInput) -> Result<Job>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based job repository implementation
pub struct SqlxJobRepository {
    pool: DbPool,
}

impl SqlxJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DbPool) -> Arc<dyn JobRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_COLUMNS: &str = "id, title, company, location, job_type, level, salary_min, \
     salary_max, requirements, benefits, status, applications_count, views_count, deadline, \
     created_at, updated_at";

#[async_trait]
impl JobRepository for SqlxJobRepository {
    async fn create(&self, input: CreateJobInput) -> Result<Job> {
        let mut job = Job::new(input);

        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, company, location, job_type, level, salary_min, salary_max,
                requirements, benefits, status, applications_count, views_count, deadline,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type.as_db_str())
        .bind(job.level.as_db_str())
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(encode_string_list(&job.requirements))
        .bind(encode_string_list(&job.benefits))
        .bind(job.status.as_db_str())
        .bind(job.applications_count)
        .bind(job.views_count)
        .bind(job.deadline)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to create job"))?;

        job.id = result.last_insert_rowid();
        Ok(job)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Job>> {
        let row = sqlx::query(&format!("SELECT {} FROM jobs WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to get job"))?;

        match row {
            Some(row) => Ok(Some(row_to_job(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM jobs ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list jobs"))?;

        rows.iter().map(row_to_job).collect()
    }

    async fn list_open(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM jobs WHERE status = 'OPEN' ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to list jobs"))?;

        rows.iter().map(row_to_job).collect()
    }

    async fn update(&self, id: i64, input: UpdateJobInput) -> Result<Job> {
        let mut job = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Job not found: {}", id))?;

        if let Some(title) = input.title {
            job.title = title;
        }
        if let Some(company) = input.company {
            job.company = company;
        }
        if let Some(location) = input.location {
            job.location = location;
        }
        if let Some(job_type) = input.job_type {
            job.job_type = job_type;
        }
        if let Some(level) = input.level {
            job.level = level;
        }
        if let Some(salary_min) = input.salary_min {
            job.salary_min = salary_min;
        }
        if let Some(salary_max) = input.salary_max {
            job.salary_max = salary_max;
        }
        if let Some(requirements) = input.requirements {
            job.requirements = requirements;
        }
        if let Some(benefits) = input.benefits {
            job.benefits = benefits;
        }
        if let Some(status) = input.status {
            job.status = status;
        }
        if let Some(applications_count) = input.applications_count {
            job.applications_count = applications_count;
        }
        if let Some(views_count) = input.views_count {
            job.views_count = views_count;
        }
        if let Some(deadline) = input.deadline {
            job.deadline = deadline;
        }
        job.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE jobs
            SET title = ?, company = ?, location = ?, job_type = ?, level = ?, salary_min = ?,
                salary_max = ?, requirements = ?, benefits = ?, status = ?,
                applications_count = ?, views_count = ?, deadline = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type.as_db_str())
        .bind(job.level.as_db_str())
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(encode_string_list(&job.requirements))
        .bind(encode_string_list(&job.benefits))
        .bind(job.status.as_db_str())
        .bind(job.applications_count)
        .bind(job.views_count)
        .bind(job.deadline)
        .bind(job.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to update job"))?;

        Ok(job)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to delete job"))?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Failed to delete job: not found: {}", id));
        }
        Ok(())
    }
}

fn row_to_job(row: &sqlx::sqlite::SqliteRow) -> Result<Job> {
    Ok(Job {
        id: row.get("id"),
        title: row.get("title"),
        company: row.get("company"),
        location: row.get("location"),
        job_type: row.get::<String, _>("job_type").parse()?,
        level: row.get::<String, _>("level").parse()?,
        salary_min: row.get("salary_min"),
        salary_max: row.get("salary_max"),
        requirements: decode_string_list(&row.get::<String, _>("requirements")),
        benefits: decode_string_list(&row.get::<String, _>("benefits")),
        status: row.get::<String, _>("status").parse()?,
        applications_count: row.get("applications_count"),
        views_count: row.get("views_count"),
        deadline: row.get("deadline"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::models::{JobStatus, JobType};

    async fn setup_test_repo() -> SqlxJobRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxJobRepository::new(pool)
    }

    fn sample_input(title: &str, status: JobStatus) -> CreateJobInput {
        CreateJobInput {
            title: title.to_string(),
            company: "AssetMagnets".to_string(),
            location: "Remote".to_string(),
            job_type: Some(JobType::Contract),
            level: None,
            salary_min: Some(80000.0),
            salary_max: Some(120000.0),
            requirements: vec!["Rust".to_string(), "SQL".to_string()],
            benefits: vec!["Remote-first".to_string()],
            status: Some(status),
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_job() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input("Backend Engineer", JobStatus::Open))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Backend Engineer");
        assert_eq!(found.job_type, JobType::Contract);
        assert_eq!(found.requirements, vec!["Rust", "SQL"]);
        assert!(found.deadline.is_none());
    }

    #[tokio::test]
    async fn test_list_open_filters_closed() {
        let repo = setup_test_repo().await;
        repo.create(sample_input("Open role", JobStatus::Open))
            .await
            .unwrap();
        repo.create(sample_input("Closed role", JobStatus::Closed))
            .await
            .unwrap();

        let open = repo.list_open().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Open role");
    }

    #[tokio::test]
    async fn test_update_counters() {
        let repo = setup_test_repo().await;
        let created = repo
            .create(sample_input("Counted role", JobStatus::Open))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateJobInput {
                    applications_count: Some(3),
                    views_count: Some(42),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.applications_count, 3);
        assert_eq!(updated.views_count, 42);
    }

    #[tokio::test]
    async fn test_delete_missing_is_an_error() {
        let repo = setup_test_repo().await;
        assert!(repo.delete(8080).await.is_err());
    }
}
