//! WebAssembly module for the NASA POWER Weather Forecast Service
//!
//! Provides client-side computation for:
//! - Rainfall risk estimates
//! - Synthetic 30-day outlooks
//! - Advisory recommendations
//! - Request validation before hitting the server

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{
    ConditionsBaseline, DateRange, ForecastWindowStats, HistoricalStats, PredictionSummary,
    RecommendationInputs,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(concat!(
        "weather-forecast-wasm ",
        env!("CARGO_PKG_VERSION")
    )));
}

fn to_js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Rainfall assessment as JSON
#[wasm_bindgen]
pub fn estimate_rainfall(temperature: f64, humidity: f64, pressure: f64) -> Result<String, JsValue> {
    shared::validate_temperature(temperature).map_err(to_js_error)?;
    shared::validate_humidity(humidity).map_err(to_js_error)?;
    shared::validate_pressure(pressure).map_err(to_js_error)?;

    let assessment = shared::predict_rainfall(temperature, humidity, pressure);
    serde_json::to_string(&assessment).map_err(to_js_error)
}

/// Short weather description for a day
#[wasm_bindgen]
pub fn describe_weather(rainfall_probability: f64, temperature: f64) -> String {
    shared::weather_label(rainfall_probability, temperature).to_string()
}

/// Recommendations from historical stats JSON and forecast window stats JSON
#[wasm_bindgen]
pub fn recommendations(historical_json: &str, forecast_json: &str) -> Result<String, JsValue> {
    let historical: HistoricalStats = serde_json::from_str(historical_json)
        .map_err(|e| to_js_error(format!("Invalid historical stats JSON: {}", e)))?;
    let forecast: ForecastWindowStats = serde_json::from_str(forecast_json)
        .map_err(|e| to_js_error(format!("Invalid forecast stats JSON: {}", e)))?;

    let inputs = RecommendationInputs::new(&historical, &forecast);
    serde_json::to_string(&shared::generate_recommendations(&inputs)).map_err(to_js_error)
}

/// Days covered by a YYYYMMDD date range, inclusive
#[wasm_bindgen]
pub fn check_date_range(start: &str, end: &str) -> Result<i64, JsValue> {
    let range: DateRange = shared::validate_date_range(start, end).map_err(to_js_error)?;
    Ok(range.days())
}

/// Check a forecast request before sending it
#[wasm_bindgen]
pub fn check_forecast_request(
    latitude: f64,
    longitude: f64,
    start: &str,
    end: &str,
    forecast_months: u32,
) -> Result<(), JsValue> {
    shared::validate_coordinates(latitude, longitude).map_err(to_js_error)?;
    shared::validate_date_range(start, end).map_err(to_js_error)?;
    shared::validate_forecast_months(forecast_months).map_err(to_js_error)
}

/// Seeded synthetic outlook from a baseline, as `{predictions, summary}` JSON
#[wasm_bindgen]
pub fn synthetic_outlook(
    avg_temperature: f64,
    avg_windspeed: f64,
    start_date: &str,
    days: u32,
    seed: u64,
) -> Result<String, JsValue> {
    let start: NaiveDate = shared::validate_compact_date(start_date).map_err(to_js_error)?;
    let baseline = ConditionsBaseline {
        avg_temperature,
        avg_windspeed,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let conditions = shared::generate_daily_conditions(&mut rng, &baseline, start, days);
    let predictions = shared::predict_days(&conditions);
    let summary = PredictionSummary::from_predictions(&predictions);

    serde_json::to_string(&serde_json::json!({
        "predictions": predictions,
        "summary": summary,
    }))
    .map_err(to_js_error)
}
