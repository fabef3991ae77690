//! Global office API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{CreateGlobalOfficeInput, GlobalOffice, UpdateGlobalOfficeInput};

/// Request for creating a global office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGlobalOfficeRequest {
    pub city: String,
    pub country: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_headquarters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
}

/// Request for updating a global office.
///
/// Nullable columns use double options: an absent field stays unchanged,
/// an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGlobalOfficeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_headquarters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_hours: Option<Option<String>>,
}

/// Distinguish "field absent" (outer None) from "field set to null"
/// (inner None) when deserializing update requests.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

impl CreateGlobalOfficeRequest {
    pub fn into_input(self) -> Result<CreateGlobalOfficeInput, ApiError> {
        validate_coordinates(self.latitude, self.longitude)?;

        Ok(CreateGlobalOfficeInput {
            city: self.city,
            country: self.country,
            address: self.address,
            postal_code: self.postal_code,
            phone: self.phone,
            email: self.email,
            latitude: self.latitude,
            longitude: self.longitude,
            is_headquarters: self.is_headquarters,
            active: self.active,
            working_hours: self.working_hours,
        })
    }
}

impl UpdateGlobalOfficeRequest {
    pub fn into_input(self) -> Result<UpdateGlobalOfficeInput, ApiError> {
        validate_coordinates(self.latitude.flatten(), self.longitude.flatten())?;

        Ok(UpdateGlobalOfficeInput {
            city: self.city,
            country: self.country,
            address: self.address,
            postal_code: self.postal_code,
            phone: self.phone,
            email: self.email,
            latitude: self.latitude,
            longitude: self.longitude,
            is_headquarters: self.is_headquarters,
            active: self.active,
            working_hours: self.working_hours,
        })
    }
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ApiError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ApiError::validation_error("Latitude out of range"));
        }
    }
    if let Some(lng) = longitude {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ApiError::validation_error("Longitude out of range"));
        }
    }
    Ok(())
}

/// Build the global offices router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_offices).post(create_office))
        .route(
            "/{id}",
            get(get_office).put(update_office).delete(delete_office),
        )
}

/// GET /api/global-offices - List all offices
async fn list_offices(State(state): State<AppState>) -> Result<Json<Vec<GlobalOffice>>, ApiError> {
    let offices = state
        .global_offices
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(offices))
}

/// POST /api/global-offices - Create an office
async fn create_office(
    State(state): State<AppState>,
    Json(request): Json<CreateGlobalOfficeRequest>,
) -> Result<Json<GlobalOffice>, ApiError> {
    let created = state
        .global_offices
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(created))
}

/// GET /api/global-offices/{id} - Get one office
async fn get_office(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GlobalOffice>, ApiError> {
    let office = state
        .global_offices
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Global office not found: {}", id)))?;
    Ok(Json(office))
}

/// PUT /api/global-offices/{id} - Update an office
async fn update_office(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateGlobalOfficeRequest>,
) -> Result<Json<GlobalOffice>, ApiError> {
    ensure_exists(&state, id).await?;

    let updated = state
        .global_offices
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/global-offices/{id} - Delete an office
async fn delete_office(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state
        .global_offices
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(StatusCode::OK)
}

async fn ensure_exists(state: &AppState, id: i64) -> Result<(), ApiError> {
    state
        .global_offices
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(format!("Global office not found: {}", id)))
}
