//! Forecast service: fetch history, run the forecaster, assemble the response

use serde::{Deserialize, Serialize};
use shared::{
    generate_recommendations, iso_midnight, max_upper, min_lower, DateRange, ForecastPoint,
    ForecastWindowStats, GpsCoordinates, HistoricalSeries, Period, RecommendationInputs,
};
use validator::Validate;

use super::{request_date_range, validate_compact_date_field};
use crate::error::{AppError, AppResult};
use crate::external::PowerClient;
use crate::forecasting::{Forecast, Forecaster};

/// Days returned per requested month
pub const DAYS_PER_MONTH: u32 = 30;

fn default_forecast_months() -> u32 {
    12
}

/// Input for a long-range forecast
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForecastRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// `YYYYMMDD`
    #[validate(custom = "validate_compact_date_field")]
    pub start_date: String,
    /// `YYYYMMDD`
    #[validate(custom = "validate_compact_date_field")]
    pub end_date: String,
    #[serde(default = "default_forecast_months")]
    #[validate(range(min = 1, max = 12))]
    pub forecast_months: u32,
}

/// One forecast day as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDataPoint {
    /// `YYYY-MM-DDT00:00:00`
    pub date: String,
    pub temperature: f64,
    pub temperature_lower: f64,
    pub temperature_upper: f64,
}

impl From<&ForecastPoint> for ForecastDataPoint {
    fn from(point: &ForecastPoint) -> Self {
        Self {
            date: iso_midnight(point.date),
            temperature: point.value,
            temperature_lower: point.lower,
            temperature_upper: point.upper,
        }
    }
}

/// Historical and forecast summary figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStatistics {
    pub historical_avg_temp: f64,
    pub historical_max_temp: f64,
    pub historical_min_temp: f64,
    pub historical_avg_rainfall: f64,
    pub historical_total_rainfall: f64,
    pub historical_avg_windspeed: f64,
    /// Mean of the first 90 forecast days
    pub forecast_avg_temp: f64,
    /// Highest upper bound over the whole horizon
    pub forecast_max_temp: f64,
    /// Lowest lower bound over the whole horizon
    pub forecast_min_temp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub location: GpsCoordinates,
    pub historical_period: Period,
    pub forecast_period: Period,
    pub summary_stats: SummaryStatistics,
    pub forecasts: Vec<ForecastDataPoint>,
    pub recommendations: Vec<String>,
    pub model_used: String,
}

/// Forecast service
pub struct ForecastService {
    power: PowerClient,
    forecaster: Forecaster,
}

impl ForecastService {
    pub fn new(power: PowerClient, forecaster: Forecaster) -> Self {
        Self { power, forecaster }
    }

    /// Validate the request, fetch history and forecast temperature
    pub async fn generate(&self, request: ForecastRequest) -> AppResult<ForecastResponse> {
        request.validate()?;
        let range = request_date_range(&request.start_date, &request.end_date)?;
        let location = GpsCoordinates::new(request.latitude, request.longitude);

        let series = self.power.fetch_daily(location, range).await?;

        let forecaster = self.forecaster.clone();
        let temperatures = series.temperatures();
        let last_date = series.last_date();
        let forecast =
            tokio::task::spawn_blocking(move || forecaster.forecast(&temperatures, last_date))
                .await?;

        tracing::info!(
            model = forecast.model_used,
            history_days = series.len(),
            "Forecast generated"
        );

        assemble_forecast_response(location, range, &series, &forecast, request.forecast_months)
    }

    /// Export forecast rows as CSV
    pub fn export_to_csv(response: &ForecastResponse) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in &response.forecasts {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

/// Combine history, forecast and recommendations into the response.
///
/// Summary statistics use the full forecast; only the returned rows are cut
/// to `forecast_months * 30`.
pub fn assemble_forecast_response(
    location: GpsCoordinates,
    requested: DateRange,
    series: &HistoricalSeries,
    forecast: &Forecast,
    forecast_months: u32,
) -> AppResult<ForecastResponse> {
    let days_to_return = (forecast_months * DAYS_PER_MONTH) as usize;
    if forecast.points.len() < days_to_return {
        return Err(AppError::Internal(format!(
            "Forecast generation failed: {} days requested but only {} forecast",
            days_to_return,
            forecast.points.len()
        )));
    }

    let historical = series.stats();
    let window = ForecastWindowStats::from_points(&forecast.points);

    let summary_stats = SummaryStatistics {
        historical_avg_temp: historical.avg_temperature,
        historical_max_temp: historical.max_temperature,
        historical_min_temp: historical.min_temperature,
        historical_avg_rainfall: historical.avg_rainfall,
        historical_total_rainfall: historical.total_rainfall,
        historical_avg_windspeed: historical.avg_windspeed,
        forecast_avg_temp: window.avg,
        forecast_max_temp: max_upper(&forecast.points),
        forecast_min_temp: min_lower(&forecast.points),
    };

    let recommendations =
        generate_recommendations(&RecommendationInputs::new(&historical, &window));

    let returned = &forecast.points[..days_to_return];
    let forecast_period = match (returned.first(), returned.last()) {
        (Some(first), Some(last)) => Period::from_dates(first.date, last.date),
        _ => {
            return Err(AppError::Internal(
                "Forecast generation failed: empty forecast".to_string(),
            ))
        }
    };

    Ok(ForecastResponse {
        location,
        historical_period: Period::from_dates(requested.start, requested.end),
        forecast_period,
        summary_stats,
        forecasts: returned.iter().map(ForecastDataPoint::from).collect(),
        recommendations,
        model_used: forecast.model_used.to_string(),
    })
}
