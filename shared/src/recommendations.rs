//! Weather advisories from historical and forecast summaries

use serde::{Deserialize, Serialize};

use crate::models::{ForecastWindowStats, HistoricalStats};

pub const HIGH_TEMPERATURE: &str =
    "⚠️ High temperatures expected - plan outdoor activities for early morning or evening";
pub const COLD_TEMPERATURE: &str =
    "❄️ Cold temperatures expected - ensure proper heating and winter clothing";
pub const EXTREME_HEAT: &str =
    "🌡️ Extreme heat likely - stay hydrated and avoid prolonged sun exposure";
pub const FREEZING: &str =
    "🥶 Freezing conditions possible - protect water pipes and outdoor plants";
pub const HIGH_RAINFALL: &str =
    "☔ High rainfall pattern detected - consider indoor backup plans for events";
pub const LOW_RAINFALL: &str =
    "☀️ Low rainfall expected - good conditions for outdoor activities";
pub const HEAVY_RAINFALL_EPISODES: &str =
    "🌧️ Heavy rainfall episodes in historical data - prepare for potential flooding";
pub const WINDY: &str = "💨 Windy conditions common - secure outdoor items and structures";
pub const TRENDING_HIGHER: &str = "📈 Temperatures trending higher than historical average";
pub const TRENDING_LOWER: &str = "📉 Temperatures trending lower than historical average";
pub const FAVORABLE: &str = "✓ Weather conditions appear favorable for most activities";

/// Inputs the advisory rules look at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RecommendationInputs {
    pub forecast_avg_temp: f64,
    pub forecast_max_temp: f64,
    pub forecast_min_temp: f64,
    pub historical_avg_temp: f64,
    pub historical_avg_rainfall: f64,
    pub historical_max_rainfall: f64,
    pub historical_avg_windspeed: f64,
}

impl RecommendationInputs {
    pub fn new(historical: &HistoricalStats, forecast: &ForecastWindowStats) -> Self {
        Self {
            forecast_avg_temp: forecast.avg,
            forecast_max_temp: forecast.max,
            forecast_min_temp: forecast.min,
            historical_avg_temp: historical.avg_temperature,
            historical_avg_rainfall: historical.avg_rainfall,
            historical_max_rainfall: historical.max_rainfall,
            historical_avg_windspeed: historical.avg_windspeed,
        }
    }
}

/// Evaluate every advisory rule in order. Returns the favorable message alone
/// when nothing fires.
pub fn generate_recommendations(inputs: &RecommendationInputs) -> Vec<String> {
    let mut recommendations = Vec::new();

    // Temperature
    if inputs.forecast_avg_temp > 30.0 {
        recommendations.push(HIGH_TEMPERATURE);
    } else if inputs.forecast_avg_temp < 10.0 {
        recommendations.push(COLD_TEMPERATURE);
    }

    if inputs.forecast_max_temp > 35.0 {
        recommendations.push(EXTREME_HEAT);
    }

    if inputs.forecast_min_temp < 5.0 {
        recommendations.push(FREEZING);
    }

    // Rainfall
    if inputs.historical_avg_rainfall > 5.0 {
        recommendations.push(HIGH_RAINFALL);
    } else if inputs.historical_avg_rainfall < 1.0 {
        recommendations.push(LOW_RAINFALL);
    }

    if inputs.historical_max_rainfall > 20.0 {
        recommendations.push(HEAVY_RAINFALL_EPISODES);
    }

    // Wind
    if inputs.historical_avg_windspeed > 10.0 {
        recommendations.push(WINDY);
    }

    // Trend against history
    if inputs.forecast_avg_temp > inputs.historical_avg_temp + 5.0 {
        recommendations.push(TRENDING_HIGHER);
    } else if inputs.forecast_avg_temp < inputs.historical_avg_temp - 5.0 {
        recommendations.push(TRENDING_LOWER);
    }

    if recommendations.is_empty() {
        recommendations.push(FAVORABLE);
    }

    recommendations.into_iter().map(String::from).collect()
}
