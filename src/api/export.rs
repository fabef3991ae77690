//! Export API endpoints
//!
//! - GET /api/export/settings - Read persisted export preferences
//! - PUT /api/export/settings - Replace persisted export preferences
//! - GET /api/export/{entity} - Download a snapshot of one collection
//!   (or `all`), with query parameters overriding the stored preferences

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::api::{ApiError, AppState};
use crate::services::{EntityKind, ExportError, ExportOverrides, ExportSettings};

/// Build the export router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/{entity}", get(download_export))
}

/// GET /api/export/settings - Read persisted preferences
async fn get_settings(State(state): State<AppState>) -> Json<ExportSettings> {
    Json(state.export.load_settings().await)
}

/// PUT /api/export/settings - Replace persisted preferences
async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<ExportSettings>,
) -> Result<Json<ExportSettings>, ApiError> {
    state
        .export
        .save_settings(&settings)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;
    Ok(Json(settings))
}

/// GET /api/export/{entity} - Download a snapshot
async fn download_export(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(overrides): Query<ExportOverrides>,
) -> Result<Response, ApiError> {
    let entity: EntityKind = entity
        .parse()
        .map_err(|e: anyhow::Error| ApiError::validation_error(e.to_string()))?;

    let file = state
        .export
        .export(entity, overrides)
        .await
        .map_err(export_error_to_api)?;

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    let mut response = file.bytes.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(file.content_type),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    Ok(response)
}

fn export_error_to_api(error: ExportError) -> ApiError {
    match &error {
        ExportError::CsvForAll | ExportError::NotImplemented(_) => {
            ApiError::validation_error(error.to_string())
        }
        ExportError::Fetch(_) | ExportError::Serialize(_) => {
            ApiError::internal_error(error.to_string())
        }
    }
}
