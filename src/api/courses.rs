//! Course API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{Course, CourseLevel, CreateCourseInput, UpdateCourseInput};

/// Request for creating a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<i64>,
    #[serde(default)]
    pub category: String,
    /// Lowercase level label; defaults to beginner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Request for updating a course
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl CreateCourseRequest {
    pub fn into_input(self) -> Result<CreateCourseInput, ApiError> {
        if self.price < 0.0 || self.discount_price.is_some_and(|p| p < 0.0) {
            return Err(ApiError::validation_error("Prices must be non-negative"));
        }
        let level = self
            .level
            .as_deref()
            .map(|l| {
                l.parse::<CourseLevel>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(CreateCourseInput {
            title: self.title,
            description: self.description,
            instructor_id: self.instructor_id,
            category: self.category,
            level,
            price: self.price,
            discount_price: self.discount_price,
            published: self.published,
        })
    }
}

impl UpdateCourseRequest {
    pub fn into_input(self) -> Result<UpdateCourseInput, ApiError> {
        let level = self
            .level
            .as_deref()
            .map(|l| {
                l.parse::<CourseLevel>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(UpdateCourseInput {
            title: self.title,
            description: self.description,
            instructor_id: self.instructor_id,
            category: self.category,
            level,
            price: self.price,
            discount_price: self.discount_price,
            rating: self.rating,
            enrolled_count: self.enrolled_count,
            published: self.published,
        })
    }
}

/// Build the courses router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// GET /api/courses - List all courses
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, ApiError> {
    let courses = state
        .courses
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(courses))
}

/// POST /api/courses - Create a course
async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<Json<Course>, ApiError> {
    let created = state
        .courses
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/courses/{id} - Get one course
async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError> {
    let course = state
        .courses
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Course not found: {}", id)))?;
    Ok(Json(course))
}

/// PUT /api/courses/{id} - Update a course
async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .courses
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/courses/{id} - Delete a course
async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .courses
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .courses
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Course not found: {}", id)))
}
