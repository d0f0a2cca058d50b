//! Service metadata and health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub model: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Root endpoint
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "NASA Weather Forecast Service".to_string(),
        status: "running".to_string(),
        model: state.forecaster.model_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: [
            "/forecast",
            "/predict-rainfall",
            "/thirty-day-forecast",
            "/historical-summary",
            "/health",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    })
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: state.forecaster.model_name().to_string(),
    })
}
