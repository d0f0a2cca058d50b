//! Forecast handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::forecast::{ForecastRequest, ForecastService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Generate a long-range temperature forecast
pub async fn generate_forecast(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(input): Json<ForecastRequest>,
) -> AppResult<impl IntoResponse> {
    let service = ForecastService::new(state.power.clone(), state.forecaster.clone());
    let forecast = service.generate(input).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ForecastService::export_to_csv(&forecast)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"forecast.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(forecast).into_response())
    }
}
