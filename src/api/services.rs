//! Service API endpoints
//!
//! Handles HTTP requests for service management:
//! - GET /api/services - List services
//! - POST /api/services - Create a service
//! - GET /api/services/{id} - Get one service
//! - PUT /api/services/{id} - Update a service
//! - DELETE /api/services/{id} - Delete a service
//!
//! Requests and responses use the legacy wire shape: lowercase status
//! labels and prices nested under `price`. Payloads are validated here at
//! the boundary; repositories receive typed input only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::{CreateServiceInput, ServiceStatus, UpdateServiceInput};
use crate::shape::{service_to_legacy, PriceTiers, ServiceWire};

/// Request for creating a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Lowercase status label; defaults to draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub price: PriceTiers,
}

/// Request for updating a service; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceTiers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl CreateServiceRequest {
    /// Validate and convert into the typed repository input
    pub fn into_input(self) -> Result<CreateServiceInput, ApiError> {
        let status = parse_status(self.status.as_deref())?;
        validate_price(&self.price)?;

        Ok(CreateServiceInput {
            title: self.title,
            description: self.description,
            long_description: self.long_description,
            icon: self.icon,
            features: self.features,
            category: self.category,
            status,
            basic_price: self.price.basic,
            premium_price: self.price.premium,
            enterprise_price: self.price.enterprise,
        })
    }
}

impl UpdateServiceRequest {
    /// Validate and convert into the typed repository input
    pub fn into_input(self) -> Result<UpdateServiceInput, ApiError> {
        let status = parse_status(self.status.as_deref())?;
        if let Some(price) = &self.price {
            validate_price(price)?;
        }

        Ok(UpdateServiceInput {
            title: self.title,
            description: self.description,
            long_description: self.long_description,
            icon: self.icon,
            features: self.features,
            category: self.category,
            status,
            basic_price: self.price.map(|p| p.basic),
            premium_price: self.price.map(|p| p.premium),
            enterprise_price: self.price.map(|p| p.enterprise),
            popularity: self.popularity,
            clients: self.clients,
            rating: self.rating,
        })
    }
}

fn parse_status(label: Option<&str>) -> Result<Option<ServiceStatus>, ApiError> {
    label
        .map(|s| {
            s.parse::<ServiceStatus>()
                .map_err(|e| ApiError::validation_error(e.to_string()))
        })
        .transpose()
}

fn validate_price(price: &PriceTiers) -> Result<(), ApiError> {
    if price.basic < 0.0 || price.premium < 0.0 || price.enterprise < 0.0 {
        return Err(ApiError::validation_error(
            "Price tiers must be non-negative",
        ));
    }
    Ok(())
}

/// Build the services router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}

/// GET /api/services - List all services
async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<ServiceWire>>, ApiError> {
    let services = state
        .services
        .list()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(services.iter().map(service_to_legacy).collect()))
}

/// POST /api/services - Create a service
async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<ServiceWire>, ApiError> {
    let created = state
        .services
        .create(request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(service_to_legacy(&created)))
}

/// GET /api/services/{id} - Get one service
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceWire>, ApiError> {
    let service = state
        .services
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Service not found: {}", id)))?;

    Ok(Json(service_to_legacy(&service)))
}

/// PUT /api/services/{id} - Update a service
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceWire>, ApiError> {
    let exists = state
        .services
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .is_some();
    if !exists {
        return Err(ApiError::not_found(format!("Service not found: {}", id)));
    }

    let updated = state
        .services
        .update(id, request.into_input()?)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(Json(service_to_legacy(&updated)))
}

/// DELETE /api/services/{id} - Delete a service
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let exists = state
        .services
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .is_some();
    if !exists {
        return Err(ApiError::not_found(format!("Service not found: {}", id)));
    }

    state
        .services
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok(StatusCode::OK)
}
