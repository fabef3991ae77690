//! FAQ API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{CreateFaqInput, Faq, UpdateFaqInput};

/// Request for creating an FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Request for updating an FAQ entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFaqRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CreateFaqRequest {
    pub fn into_input(self) -> Result<CreateFaqInput, ApiError> {
        if self.question.trim().is_empty() {
            return Err(ApiError::validation_error("Question is required"));
        }

        Ok(CreateFaqInput {
            question: self.question,
            answer: self.answer,
            category: self.category,
            tags: self.tags,
            display_order: self.display_order,
            active: self.active,
        })
    }
}

impl UpdateFaqRequest {
    pub fn into_input(self) -> UpdateFaqInput {
        UpdateFaqInput {
            question: self.question,
            answer: self.answer,
            category: self.category,
            tags: self.tags,
            display_order: self.display_order,
            active: self.active,
        }
    }
}

/// Build the FAQs router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faqs).post(create_faq))
        .route("/{id}", get(get_faq).put(update_faq).delete(delete_faq))
}

/// GET /api/faqs - List all entries
async fn list_faqs(State(state): State<AppState>) -> Result<Json<Vec<Faq>>, ApiError> {
    let faqs = state
        .faqs
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(faqs))
}

/// POST /api/faqs - Create an entry
async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqRequest>,
) -> Result<Json<Faq>, ApiError> {
    let created = state
        .faqs
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/faqs/{id} - Get one entry
async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Faq>, ApiError> {
    let faq = state
        .faqs
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("FAQ not found: {}", id)))?;
    Ok(Json(faq))
}

/// PUT /api/faqs/{id} - Update an entry
async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateFaqRequest>,
) -> Result<Json<Faq>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .faqs
        .update(id, request.into_input())
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/faqs/{id} - Delete an entry
async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .faqs
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .faqs
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("FAQ not found: {}", id)))
}
