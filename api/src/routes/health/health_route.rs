//! GET /health — completion-backend probe plus store record count.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::health_service::HealthStatus;
use serde::Serialize;

use crate::core::app_state::AppState;

/// Response payload for /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Probe result for the configured completion backend.
    pub completion: HealthStatus,
    /// Number of records currently in the store.
    pub store_records: usize,
}

/// Handler: GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let completion = state.health.check(&state.llm_config).await;
    Json(HealthResponse {
        completion,
        store_records: state.store.count(),
    })
}
