//! HTTP API integration tests
//!
//! Drives the router in-process against a throwaway local server standing in
//! for NASA POWER.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tower::ServiceExt;
use weather_forecast_backend::config::{Config, ModelChoice};
use weather_forecast_backend::{create_app, AppState};

// ============================================================================
// Helpers
// ============================================================================

/// POWER-shaped body with `days` days of data from 2023-01-01
fn power_body(days: i64) -> String {
    power_body_with(days, |i| {
        15.0 + 5.0 * (i as f64 * 0.2).sin() + (i % 3) as f64 * 0.5
    })
}

/// One yearly cycle between roughly 7 and 24 °C
fn yearly_power_body(days: i64) -> String {
    power_body_with(days, |i| {
        15.0 + 8.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.0).sin()
            + (i % 3) as f64 * 0.5
    })
}

fn power_body_with(days: i64, temperature_on: impl Fn(i64) -> f64) -> String {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut t2m = serde_json::Map::new();
    let mut rain = serde_json::Map::new();
    let mut wind = serde_json::Map::new();

    for i in 0..days {
        let key = (start + Duration::days(i)).format("%Y%m%d").to_string();
        t2m.insert(key.clone(), json!(temperature_on(i)));
        rain.insert(key.clone(), json!((i % 4) as f64));
        wind.insert(key, json!(3.0));
    }

    json!({
        "type": "Feature",
        "properties": {"parameter": {"T2M": t2m, "PRECTOTCORR": rain, "WS2M": wind}}
    })
    .to_string()
}

/// Serve a fixed status and body on an ephemeral port
async fn spawn_power(status: StatusCode, body: String) -> String {
    let app = Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

fn app_with_power(base_url: String) -> Router {
    app_with_model(base_url, ModelChoice::Arima)
}

fn app_with_model(base_url: String, model: ModelChoice) -> Router {
    let mut config = Config::default();
    config.power.base_url = base_url;
    config.power.timeout_seconds = 5;
    config.forecast.model = model;
    config.synthetic.seed = Some(7);
    create_app(AppState::new(config).unwrap())
}

/// App whose POWER endpoint is never reached
fn offline_app() -> Router {
    app_with_power("http://127.0.0.1:9/".to_string())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn forecast_body(months: u32) -> Value {
    json!({
        "latitude": 40.7128,
        "longitude": -74.006,
        "start_date": "20230101",
        "end_date": "20230430",
        "forecast_months": months
    })
}

// ============================================================================
// Metadata
// ============================================================================

#[tokio::test]
async fn test_health_reports_model() {
    let response = offline_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "ARIMA");
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let response = offline_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "running");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/forecast"));
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn test_forecast_success() {
    let url = spawn_power(StatusCode::OK, power_body(120)).await;
    let response = app_with_power(url)
        .oneshot(post_json("/forecast", forecast_body(3)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let forecasts = body["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 90);
    // 120 days from 2023-01-01 ends on 2023-04-30
    assert_eq!(forecasts[0]["date"], "2023-05-01T00:00:00");
    assert_eq!(body["forecast_period"]["start"], "2023-05-01T00:00:00");
    assert_eq!(body["historical_period"]["start"], "2023-01-01T00:00:00");
    assert_eq!(body["model_used"], "ARIMA");
    assert_eq!(body["location"]["latitude"], 40.7128);
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
    assert!(body["summary_stats"]["historical_avg_temp"].is_number());
}

/// Default model on a single year of history
#[tokio::test]
async fn test_forecast_auto_model_stays_near_history() {
    let url = spawn_power(StatusCode::OK, yearly_power_body(365)).await;
    let response = app_with_model(url, ModelChoice::Auto)
        .oneshot(post_json(
            "/forecast",
            json!({
                "latitude": 40.7128,
                "longitude": -74.006,
                "start_date": "20230101",
                "end_date": "20231231"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let forecasts = body["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 360);
    assert_eq!(forecasts[0]["date"], "2024-01-01T00:00:00");
    for row in forecasts {
        let temperature = row["temperature"].as_f64().unwrap();
        assert!(
            (-10.0..=41.0).contains(&temperature),
            "forecast {} far outside history",
            temperature
        );
    }

    let stats = &body["summary_stats"];
    let avg = stats["forecast_avg_temp"].as_f64().unwrap();
    assert!((0.0..=30.0).contains(&avg));
    assert!(stats["forecast_max_temp"].as_f64().unwrap() < 100.0);
    assert!(stats["forecast_min_temp"].as_f64().unwrap() > -60.0);

    let model = body["model_used"].as_str().unwrap();
    assert!(model == "MSTL" || model == "ARIMA");
}

#[tokio::test]
async fn test_forecast_csv_export() {
    let url = spawn_power(StatusCode::OK, power_body(60)).await;
    let response = app_with_power(url)
        .oneshot(post_json("/forecast?format=csv", forecast_body(1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("date,temperature,temperature_lower,temperature_upper")
    );
    assert_eq!(lines.count(), 30);
}

#[tokio::test]
async fn test_forecast_rejects_invalid_latitude() {
    let mut body = forecast_body(12);
    body["latitude"] = json!(123.0);

    let response = offline_app()
        .oneshot(post_json("/forecast", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_forecast_rejects_reversed_dates() {
    let mut body = forecast_body(12);
    body["start_date"] = json!("20230601");

    let response = offline_app()
        .oneshot(post_json("/forecast", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forecast_no_data_is_not_found() {
    let body = json!({"properties": {"parameter": {
        "T2M": {"20230101": -999.0, "20230102": -999.0},
        "PRECTOTCORR": {},
        "WS2M": {}
    }}})
    .to_string();
    let url = spawn_power(StatusCode::OK, body).await;

    let response = app_with_power(url)
        .oneshot(post_json("/forecast", forecast_body(12)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["detail"], "No data available for specified location/dates");
}

#[tokio::test]
async fn test_forecast_upstream_error_is_data_source_error() {
    let url = spawn_power(StatusCode::BAD_GATEWAY, "upstream down".to_string()).await;

    let response = app_with_power(url)
        .oneshot(post_json("/forecast", forecast_body(12)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["code"], "DATA_SOURCE_ERROR");
}

#[tokio::test]
async fn test_forecast_malformed_upstream_body() {
    let url = spawn_power(StatusCode::OK, "<html>not json</html>".to_string()).await;

    let response = app_with_power(url)
        .oneshot(post_json("/forecast", forecast_body(12)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["code"], "DATA_SOURCE_ERROR");
}

// ============================================================================
// Rainfall
// ============================================================================

#[tokio::test]
async fn test_predict_rainfall() {
    let response = offline_app()
        .oneshot(post_json(
            "/predict-rainfall",
            json!({"temperature": 20.0, "humidity": 90.0, "pressure": 995.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["rainfall_probability"], 0.757);
    assert_eq!(body["confidence"], 0.85);
}

#[tokio::test]
async fn test_predict_rainfall_rejects_humidity() {
    let response = offline_app()
        .oneshot(post_json(
            "/predict-rainfall",
            json!({"temperature": 20.0, "humidity": 150.0, "pressure": 995.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_thirty_day_forecast_seeded() {
    let url = spawn_power(StatusCode::OK, power_body(90)).await;
    let app = app_with_power(url);
    let request = json!({"latitude": 13.75, "longitude": 100.5});

    let first = app
        .clone()
        .oneshot(post_json("/thirty-day-forecast", request.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = read_json(first).await;

    let predictions = first["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 30);

    let summary = &first["summary"];
    let total = summary["high_risk_days"].as_u64().unwrap()
        + summary["moderate_risk_days"].as_u64().unwrap()
        + summary["low_risk_days"].as_u64().unwrap();
    assert_eq!(total, 30);
    assert!(summary["forecast_period"].as_str().unwrap().contains(" to "));

    let second = app
        .oneshot(post_json("/thirty-day-forecast", request))
        .await
        .unwrap();
    let second = read_json(second).await;
    assert_eq!(first["predictions"], second["predictions"]);
}

// ============================================================================
// Historical Summary
// ============================================================================

#[tokio::test]
async fn test_historical_summary() {
    let url = spawn_power(StatusCode::OK, power_body(120)).await;
    let response = app_with_power(url)
        .oneshot(post_json(
            "/historical-summary",
            json!({
                "latitude": 40.7128,
                "longitude": -74.006,
                "start_date": "20230101",
                "end_date": "20230430"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["days"], 120);
    assert_eq!(body["period"]["end"], "2023-04-30T00:00:00");
    // 15 ± 5 + up to 1: no extremes, rain max 3mm, wind 3 m/s
    assert_eq!(body["risk"]["level"], "Low");
    assert_eq!(body["stats"]["max_rainfall"], 3.0);
}
