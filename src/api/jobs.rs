//! Job API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{CreateJobInput, Job, JobLevel, JobStatus, JobType, UpdateJobInput};

/// Request for creating a job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Lowercase type label; defaults to full_time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    /// Lowercase level label; defaults to mid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Request for updating a job posting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<DateTime<Utc>>>,
}

impl CreateJobRequest {
    pub fn into_input(self) -> Result<CreateJobInput, ApiError> {
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(ApiError::validation_error(
                    "Salary lower bound exceeds upper bound",
                ));
            }
        }
        let job_type = parse_label::<JobType>(self.job_type.as_deref())?;
        let level = parse_label::<JobLevel>(self.level.as_deref())?;
        let status = parse_label::<JobStatus>(self.status.as_deref())?;

        Ok(CreateJobInput {
            title: self.title,
            company: self.company,
            location: self.location,
            job_type,
            level,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            requirements: self.requirements,
            benefits: self.benefits,
            status,
            deadline: self.deadline,
        })
    }
}

impl UpdateJobRequest {
    pub fn into_input(self) -> Result<UpdateJobInput, ApiError> {
        let job_type = parse_label::<JobType>(self.job_type.as_deref())?;
        let level = parse_label::<JobLevel>(self.level.as_deref())?;
        let status = parse_label::<JobStatus>(self.status.as_deref())?;

        Ok(UpdateJobInput {
            title: self.title,
            company: self.company,
            location: self.location,
            job_type,
            level,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            requirements: self.requirements,
            benefits: self.benefits,
            status,
            applications_count: self.applications_count,
            views_count: self.views_count,
            deadline: self.deadline,
        })
    }
}

fn parse_label<T>(label: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = anyhow::Error>,
{
    label
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| ApiError::validation_error(e.to_string()))
        })
        .transpose()
}

/// Build the jobs router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/{id}", get(get_job).put(update_job).delete(delete_job))
}

/// GET /api/jobs - List all postings
async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = state
        .jobs
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(jobs))
}

/// POST /api/jobs - Create a posting
async fn create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let created = state
        .jobs
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/jobs/{id} - Get one posting
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Job>, ApiError> {
    let job = state
        .jobs
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Job not found: {}", id)))?;
    Ok(Json(job))
}

/// PUT /api/jobs/{id} - Update a posting
async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .jobs
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/jobs/{id} - Delete a posting
async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .jobs
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .jobs
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Job not found: {}", id)))
}
