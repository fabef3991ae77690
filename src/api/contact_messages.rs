//! Contact message API endpoints
//!
//! The public contact form posts here; the admin inbox lists, triages and
//! replies. Status has no transition rules: the admin can set any label at
//! any time.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{
    ContactMessage, CreateContactMessageInput, MessagePriority, MessageStatus,
    UpdateContactMessageInput,
};

/// Request for creating a contact message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactMessageRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Lowercase priority label; defaults to medium
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Request for updating a contact message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactMessageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl CreateContactMessageRequest {
    pub fn into_input(self) -> Result<CreateContactMessageInput, ApiError> {
        if self.email.trim().is_empty() {
            return Err(ApiError::validation_error("Sender email is required"));
        }
        let priority = self
            .priority
            .as_deref()
            .map(|p| {
                p.parse::<MessagePriority>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(CreateContactMessageInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            priority,
        })
    }
}

impl UpdateContactMessageRequest {
    pub fn into_input(self) -> Result<UpdateContactMessageInput, ApiError> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<MessageStatus>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(|p| {
                p.parse::<MessagePriority>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(UpdateContactMessageInput {
            status,
            priority,
            reply: self.reply,
        })
    }
}

/// Build the contact messages router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route(
            "/{id}",
            get(get_message).put(update_message).delete(delete_message),
        )
}

/// GET /api/contact-messages - List all messages
async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let messages = state
        .contact_messages
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(messages))
}

/// POST /api/contact-messages - Create a message
async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateContactMessageRequest>,
) -> Result<Json<ContactMessage>, ApiError> {
    let created = state
        .contact_messages
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/contact-messages/{id} - Get one message
async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContactMessage>, ApiError> {
    let message = state
        .contact_messages
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Contact message not found: {}", id)))?;
    Ok(Json(message))
}

/// PUT /api/contact-messages/{id} - Update a message
async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateContactMessageRequest>,
) -> Result<Json<ContactMessage>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .contact_messages
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/contact-messages/{id} - Delete a message
async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .contact_messages
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .contact_messages
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Contact message not found: {}", id)))
}
