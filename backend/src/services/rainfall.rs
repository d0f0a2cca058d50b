//! Rainfall service: single-point estimates and the 30-day outlook

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use shared::{
    generate_daily_conditions, predict_days, predict_rainfall, validate_pressure,
    validate_temperature, ConditionsBaseline, DailyPrediction, DateRange, GpsCoordinates,
    PredictionSummary, RainfallAssessment,
};
use validator::Validate;

use crate::config::SyntheticConfig;
use crate::error::{AppError, AppResult};
use crate::external::PowerClient;

/// Input for a single rainfall estimate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RainfallRequest {
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    /// hPa
    #[validate(range(min = 0.0, max = 2000.0))]
    pub pressure: f64,
}

/// Input for the 30-day outlook
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ThirtyDayRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThirtyDayForecastResponse {
    pub location: GpsCoordinates,
    pub predictions: Vec<DailyPrediction>,
    pub summary: PredictionSummary,
}

/// Rainfall service
pub struct RainfallService {
    power: PowerClient,
    synthetic: SyntheticConfig,
}

impl RainfallService {
    pub fn new(power: PowerClient, synthetic: SyntheticConfig) -> Self {
        Self { power, synthetic }
    }

    /// Estimate rainfall risk for one set of conditions
    pub fn predict(request: &RainfallRequest) -> AppResult<RainfallAssessment> {
        request.validate()?;
        validate_temperature(request.temperature)
            .and_then(|_| validate_pressure(request.pressure))
            .map_err(|message| AppError::Validation(message.to_string()))?;

        Ok(predict_rainfall(
            request.temperature,
            request.humidity,
            request.pressure,
        ))
    }

    /// 30-day outlook starting tomorrow
    pub async fn thirty_day_forecast(
        &self,
        request: ThirtyDayRequest,
    ) -> AppResult<ThirtyDayForecastResponse> {
        self.thirty_day_forecast_from(request, Utc::now().date_naive())
            .await
    }

    /// 30-day outlook for the days after `today`, anchored on the
    /// configured number of preceding days of history
    pub async fn thirty_day_forecast_from(
        &self,
        request: ThirtyDayRequest,
        today: NaiveDate,
    ) -> AppResult<ThirtyDayForecastResponse> {
        request.validate()?;
        let location = GpsCoordinates::new(request.latitude, request.longitude);

        let history = DateRange::new(today - Duration::days(self.synthetic.history_days), today);
        let series = self.power.fetch_daily(location, history).await?;
        let baseline = ConditionsBaseline::from(&series.stats());

        let mut rng = match self.synthetic.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let conditions = generate_daily_conditions(
            &mut rng,
            &baseline,
            today + Duration::days(1),
            self.synthetic.days,
        );
        let predictions = predict_days(&conditions);
        let summary = PredictionSummary::from_predictions(&predictions);

        tracing::info!(
            high_risk_days = summary.high_risk_days,
            period = %summary.forecast_period,
            "Thirty-day outlook generated"
        );

        Ok(ThirtyDayForecastResponse {
            location,
            predictions,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RiskLevel;

    #[test]
    fn test_predict_valid_request() {
        let request = RainfallRequest {
            temperature: 20.0,
            humidity: 90.0,
            pressure: 995.0,
        };
        let result = RainfallService::predict(&request).unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.rainfall_probability, 0.757);
    }

    #[test]
    fn test_predict_rejects_out_of_range() {
        let humid = RainfallRequest {
            temperature: 20.0,
            humidity: 101.0,
            pressure: 1000.0,
        };
        assert!(matches!(
            RainfallService::predict(&humid),
            Err(AppError::Validation(_))
        ));

        let vacuum = RainfallRequest {
            pressure: 0.0,
            humidity: 50.0,
            ..humid
        };
        assert!(matches!(
            RainfallService::predict(&vacuum),
            Err(AppError::Validation(_))
        ));
    }
}
