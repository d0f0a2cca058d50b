//! NASA POWER Weather Forecast Service - Backend
//!
//! Fetches daily history for a point from NASA POWER, forecasts temperature a
//! year ahead and estimates rainfall risk over the coming month.

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod forecasting;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::PowerClient;
use forecasting::Forecaster;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub power: PowerClient,
    pub forecaster: Forecaster,
}

impl AppState {
    /// Build state from configuration, resolving the forecasting strategy once
    pub fn new(config: Config) -> AppResult<Self> {
        let power = PowerClient::new(&config.power)?;
        let forecaster = Forecaster::resolve(config.forecast.model, config.forecast.horizon_days);

        Ok(Self {
            config: Arc::new(config),
            power,
            forecaster,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS configuration; `*` allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
