//! Route definitions for the weather forecast service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Service metadata
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Long-range temperature forecast (JSON or CSV)
        .route("/forecast", post(handlers::generate_forecast))
        // Rainfall risk
        .route("/predict-rainfall", post(handlers::predict_rainfall))
        .route("/thirty-day-forecast", post(handlers::thirty_day_forecast))
        // Historical summary
        .route("/historical-summary", post(handlers::historical_summary))
}
