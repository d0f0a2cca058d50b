//! Historical summary service

use serde::{Deserialize, Serialize};
use shared::{
    assess_historical_risk, GpsCoordinates, HistoricalRisk, HistoricalSeries, HistoricalStats,
    Period,
};
use validator::Validate;

use super::{request_date_range, validate_compact_date_field};
use crate::error::AppResult;
use crate::external::PowerClient;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HistoricalSummaryRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(custom = "validate_compact_date_field")]
    pub start_date: String,
    #[validate(custom = "validate_compact_date_field")]
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalSummaryResponse {
    pub location: GpsCoordinates,
    /// First and last day actually returned by the data source
    pub period: Period,
    pub days: usize,
    pub stats: HistoricalStats,
    pub risk: HistoricalRisk,
}

impl HistoricalSummaryResponse {
    /// Summarize a series. Risk thresholds apply to the rounded stats, so the
    /// reasons never contradict the figures they quote.
    pub fn from_series(location: GpsCoordinates, series: &HistoricalSeries) -> Self {
        let stats = series.stats().rounded();
        Self {
            location,
            period: Period::from_dates(series.first_date(), series.last_date()),
            days: series.len(),
            stats,
            risk: assess_historical_risk(&stats),
        }
    }
}

/// Historical summary service
pub struct HistoricalService {
    power: PowerClient,
}

impl HistoricalService {
    pub fn new(power: PowerClient) -> Self {
        Self { power }
    }

    /// Aggregate a historical period and assess its weather risk
    pub async fn summarize(
        &self,
        request: HistoricalSummaryRequest,
    ) -> AppResult<HistoricalSummaryResponse> {
        request.validate()?;
        let range = request_date_range(&request.start_date, &request.end_date)?;
        let location = GpsCoordinates::new(request.latitude, request.longitude);

        let series = self.power.fetch_daily(location, range).await?;
        Ok(HistoricalSummaryResponse::from_series(location, &series))
    }
}
