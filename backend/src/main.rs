//! NASA POWER Weather Forecast Service - Backend Server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_forecast_backend::{
    config::{Config, LogFormat},
    create_app, AppState,
};

const DEFAULT_LOG_FILTER: &str = "wfs_server=debug,weather_forecast_backend=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("Starting NASA Weather Forecast Service");
    tracing::info!("Environment: {}", config.environment);

    let addr = config.bind_address();

    // Create application state
    let state = AppState::new(config)?;
    tracing::info!("Forecast model: {}", state.forecaster.model_name());

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
