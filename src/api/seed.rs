//! Default data initialization endpoint

use axum::{extract::State, Json};

use crate::api::AppState;
use crate::services::SeedReport;

/// POST /api/initialize-data
///
/// Seeds starter content into empty collections. Individual collection
/// failures are logged and skipped inside the seeding service, so this
/// endpoint always reports what was inserted rather than failing.
pub async fn initialize_data(State(state): State<AppState>) -> Json<SeedReport> {
    Json(state.seed.run().await)
}
