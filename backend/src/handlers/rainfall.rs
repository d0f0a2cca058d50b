//! Rainfall prediction handlers

use axum::{extract::State, Json};
use shared::RainfallAssessment;

use crate::error::AppResult;
use crate::services::rainfall::{
    RainfallRequest, RainfallService, ThirtyDayForecastResponse, ThirtyDayRequest,
};
use crate::AppState;

/// Estimate rainfall risk for the given conditions
pub async fn predict_rainfall(
    Json(input): Json<RainfallRequest>,
) -> AppResult<Json<RainfallAssessment>> {
    let assessment = RainfallService::predict(&input)?;
    Ok(Json(assessment))
}

/// Synthesize and assess the next 30 days
pub async fn thirty_day_forecast(
    State(state): State<AppState>,
    Json(input): Json<ThirtyDayRequest>,
) -> AppResult<Json<ThirtyDayForecastResponse>> {
    let service = RainfallService::new(state.power.clone(), state.config.synthetic.clone());
    let outlook = service.thirty_day_forecast(input).await?;
    Ok(Json(outlook))
}
