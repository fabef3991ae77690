//! Contact info API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{
    ContactInfo, ContactInfoKind, CreateContactInfoInput, UpdateContactInfoInput,
};

/// Request for creating a contact info entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactInfoRequest {
    /// Entry kind label: address, phone, email or hours
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

/// Request for updating a contact info entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactInfoRequest {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl CreateContactInfoRequest {
    pub fn into_input(self) -> Result<CreateContactInfoInput, ApiError> {
        let kind = self
            .kind
            .parse::<ContactInfoKind>()
            .map_err(|e| ApiError::validation_error(e.to_string()))?;

        Ok(CreateContactInfoInput {
            kind,
            title: self.title,
            value: self.value,
            icon: self.icon,
            active: self.active,
            display_order: self.display_order,
        })
    }
}

impl UpdateContactInfoRequest {
    pub fn into_input(self) -> Result<UpdateContactInfoInput, ApiError> {
        let kind = self
            .kind
            .as_deref()
            .map(|k| {
                k.parse::<ContactInfoKind>()
                    .map_err(|e| ApiError::validation_error(e.to_string()))
            })
            .transpose()?;

        Ok(UpdateContactInfoInput {
            kind,
            title: self.title,
            value: self.value,
            icon: self.icon,
            active: self.active,
            display_order: self.display_order,
        })
    }
}

/// Build the contact info router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

/// GET /api/contact-info - List all entries
async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<ContactInfo>>, ApiError> {
    let entries = state
        .contact_info
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(entries))
}

/// POST /api/contact-info - Create an entry
async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateContactInfoRequest>,
) -> Result<Json<ContactInfo>, ApiError> {
    let created = state
        .contact_info
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/contact-info/{id} - Get one entry
async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContactInfo>, ApiError> {
    let entry = state
        .contact_info
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Contact info not found: {}", id)))?;
    Ok(Json(entry))
}

/// PUT /api/contact-info/{id} - Update an entry
async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateContactInfoRequest>,
) -> Result<Json<ContactInfo>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .contact_info
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/contact-info/{id} - Delete an entry
async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .contact_info
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .contact_info
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Contact info not found: {}", id)))
}
