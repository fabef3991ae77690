//! User API endpoints
//!
//! Identity records for students, applicants and staff. Passwords and
//! sessions are the auth provider's concern and never pass through here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{CreateUserInput, UpdateUserInput, User, UserRole, UserStatus};

/// Request for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// Lowercase role label; defaults to student
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Request for updating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CreateUserRequest {
    pub fn into_input(self) -> Result<CreateUserInput, ApiError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ApiError::validation_error("A valid email is required"));
        }
        let role = self
            .role
            .as_deref()
            .map(|r| {
                r.parse::<UserRole>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(CreateUserInput {
            name: self.name,
            email: self.email,
            role,
        })
    }
}

impl UpdateUserRequest {
    pub fn into_input(self) -> Result<UpdateUserInput, ApiError> {
        let role = self
            .role
            .as_deref()
            .map(|r| {
                r.parse::<UserRole>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<UserStatus>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(UpdateUserInput {
            name: self.name,
            email: self.email,
            role,
            status,
            last_login_at: self.last_login_at,
        })
    }
}

/// Build the users router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /api/users - List all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(users))
}

/// POST /api/users - Create a user
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let created = state
        .users
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/users/{id} - Get one user
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", id)))?;
    Ok(Json(user))
}

/// PUT /api/users/{id} - Update a user
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .users
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/users/{id} - Delete a user
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .users
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", id)))
}
