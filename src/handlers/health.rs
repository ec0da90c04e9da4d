//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::artifacts::ArtifactStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HomeResponse {
    message: &'static str,
}

/// `GET /`
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "✅ Salary Prediction API is running!",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    artifacts: Vec<ArtifactStatus>,
}

/// `GET /health`: degraded when a salary figure cannot be produced
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.artifacts.is_ready() { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        artifacts: state.artifacts.statuses.clone(),
    })
}
