//! Health check handler.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use workdeck_storage::BlobStorage;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub document_backend: String,
    pub storage_backend: String,
}

/// Liveness probe. Reports which backends the process was wired with; it
/// does not call out to them.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        document_backend: format!("{:?}", state.config.document_backend).to_lowercase(),
        storage_backend: state.storage.backend_kind().to_string(),
    })
}
