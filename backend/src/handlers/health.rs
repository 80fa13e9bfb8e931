//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::SnapshotStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub snapshot: Option<SnapshotStatus>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // A missing or unreadable snapshot degrades the service but does not take it down
    let (status, snapshot) = match state.reports.status().await {
        Ok(snapshot) => ("healthy", Some(snapshot)),
        Err(e) => {
            tracing::warn!("Snapshot unavailable for health check: {}", e);
            ("degraded", None)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        snapshot,
    })
}
