//! Health check endpoint
//!
//! Used by uptime monitors and the hosting platform, so it answers CORS
//! preflights itself with permissive headers and short-circuits OPTIONS.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};

/// Name reported in the health payload
const SERVICE_NAME: &str = "assetmagnets-backoffice";

/// Response for the health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
    pub service: String,
}

/// GET|OPTIONS /api/health
///
/// GET returns the service status, OPTIONS returns 200 with an empty body,
/// every other method is rejected with 405.
pub async fn health(State(state): State<AppState>, method: Method) -> Response {
    let mut response = match method {
        Method::GET => Json(HealthResponse {
            status: "OK".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            environment: state.environment.clone(),
            service: SERVICE_NAME.to_string(),
        })
        .into_response(),
        Method::OPTIONS => StatusCode::OK.into_response(),
        _ => ApiError::method_not_allowed("Use GET or OPTIONS").into_response(),
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}
