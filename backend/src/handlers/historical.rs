//! Historical summary handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::historical::{
    HistoricalService, HistoricalSummaryRequest, HistoricalSummaryResponse,
};
use crate::AppState;

/// Summarize observed weather for a period with its risk level
pub async fn historical_summary(
    State(state): State<AppState>,
    Json(input): Json<HistoricalSummaryRequest>,
) -> AppResult<Json<HistoricalSummaryResponse>> {
    let service = HistoricalService::new(state.power.clone());
    let summary = service.summarize(input).await?;
    Ok(Json(summary))
}
