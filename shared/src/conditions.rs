//! Synthetic daily conditions
//!
//! Without a live current-conditions feed, upcoming days are synthesized from
//! historical averages plus a seasonal swing and random noise on pressure and
//! wind. Output is only reproducible when the caller seeds the generator.

use std::f64::consts::PI;

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyCondition, DailyPrediction, HistoricalStats, RiskLevel};
use crate::rainfall::{predict_rainfall, STANDARD_PRESSURE_HPA};
use crate::types::round_to;

/// Days synthesized per request
pub const DEFAULT_SYNTHETIC_DAYS: u32 = 30;

const SEASONAL_AMPLITUDE_C: f64 = 10.0;
const PRESSURE_NOISE_SD: f64 = 8.0;
const WIND_NOISE_SD: f64 = 2.0;

/// Historical averages the synthetic days are anchored to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConditionsBaseline {
    pub avg_temperature: f64,
    pub avg_windspeed: f64,
}

impl From<&HistoricalStats> for ConditionsBaseline {
    fn from(stats: &HistoricalStats) -> Self {
        Self {
            avg_temperature: stats.avg_temperature,
            avg_windspeed: stats.avg_windspeed,
        }
    }
}

/// Seasonal temperature offset for a date
pub fn seasonal_variation(date: NaiveDate) -> f64 {
    SEASONAL_AMPLITUDE_C * (2.0 * PI * f64::from(date.ordinal()) / 365.0).sin()
}

/// Humidity falls as the day runs warmer than the baseline
pub fn humidity_for(temperature: f64, baseline_temperature: f64) -> f64 {
    (70.0 - (temperature - baseline_temperature) * 1.5).clamp(30.0, 95.0)
}

/// Synthesize one day. Values are rounded to 1 decimal.
pub fn synthesize_day<R: Rng + ?Sized>(
    rng: &mut R,
    baseline: &ConditionsBaseline,
    date: NaiveDate,
) -> DailyCondition {
    let temperature = baseline.avg_temperature + seasonal_variation(date);
    let humidity = humidity_for(temperature, baseline.avg_temperature);

    let pressure_noise: f64 = rng.sample(StandardNormal);
    let wind_noise: f64 = rng.sample(StandardNormal);
    let pressure = STANDARD_PRESSURE_HPA + PRESSURE_NOISE_SD * pressure_noise;
    let wind_speed = (baseline.avg_windspeed + WIND_NOISE_SD * wind_noise).max(0.0);

    DailyCondition {
        date,
        temperature: round_to(temperature, 1),
        humidity: round_to(humidity, 1),
        pressure: round_to(pressure, 1),
        wind_speed: round_to(wind_speed, 1),
    }
}

/// Synthesize `days` consecutive days starting at `start`
pub fn generate_daily_conditions<R: Rng + ?Sized>(
    rng: &mut R,
    baseline: &ConditionsBaseline,
    start: NaiveDate,
    days: u32,
) -> Vec<DailyCondition> {
    (0..days)
        .map(|offset| synthesize_day(rng, baseline, start + Duration::days(i64::from(offset))))
        .collect()
}

/// Short description of the day's weather
pub fn weather_label(rainfall_probability: f64, temperature: f64) -> &'static str {
    if rainfall_probability > 0.7 {
        "Rainy"
    } else if rainfall_probability > 0.4 {
        "Partly Cloudy"
    } else if temperature > 30.0 {
        "Hot and Sunny"
    } else if temperature < 10.0 {
        "Cold and Clear"
    } else {
        "Clear"
    }
}

/// Run each synthesized day through the rainfall heuristic
pub fn predict_days(conditions: &[DailyCondition]) -> Vec<DailyPrediction> {
    conditions
        .iter()
        .map(|condition| {
            let assessment =
                predict_rainfall(condition.temperature, condition.humidity, condition.pressure);
            let label = weather_label(assessment.rainfall_probability, condition.temperature);
            DailyPrediction::new(condition, &assessment, label)
        })
        .collect()
}

/// Totals over a run of daily predictions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionSummary {
    pub high_risk_days: usize,
    pub moderate_risk_days: usize,
    pub low_risk_days: usize,
    pub average_temperature: f64,
    pub total_predicted_rainfall: f64,
    /// `YYYY-MM-DD to YYYY-MM-DD`
    pub forecast_period: String,
}

impl PredictionSummary {
    pub fn from_predictions(predictions: &[DailyPrediction]) -> Self {
        let count = |level: RiskLevel| predictions.iter().filter(|p| p.risk_level == level).count();

        let average_temperature = if predictions.is_empty() {
            0.0
        } else {
            predictions.iter().map(|p| p.temperature).sum::<f64>() / predictions.len() as f64
        };

        let forecast_period = match (predictions.first(), predictions.last()) {
            (Some(first), Some(last)) => format!("{} to {}", first.date, last.date),
            _ => String::new(),
        };

        Self {
            high_risk_days: count(RiskLevel::High),
            moderate_risk_days: count(RiskLevel::Moderate),
            low_risk_days: count(RiskLevel::Low),
            average_temperature: round_to(average_temperature, 1),
            total_predicted_rainfall: round_to(
                predictions.iter().map(|p| p.predicted_rainfall_mm).sum(),
                2,
            ),
            forecast_period,
        }
    }
}
