//! Configuration management for the weather forecast service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WFS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DEFAULT_SYNTHETIC_DAYS, MAX_FORECAST_MONTHS};

use crate::forecasting::DEFAULT_HORIZON_DAYS;
use crate::services::forecast::DAYS_PER_MONTH;

/// Shortest horizon that still serves the longest allowed request
pub const MIN_HORIZON_DAYS: usize = (MAX_FORECAST_MONTHS * DAYS_PER_MONTH) as usize;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
const DEFAULT_COMMUNITY: &str = "AG";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_FILL_VALUE: f64 = -999.0;
const DEFAULT_HISTORY_DAYS: i64 = 90;
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// NASA POWER API configuration
    pub power: PowerConfig,

    /// Forecasting configuration
    pub forecast: ForecastConfig,

    /// Synthetic daily conditions configuration
    pub synthetic: SyntheticConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PowerConfig {
    /// Daily point endpoint
    pub base_url: String,

    /// POWER user community (AG, RE, SB)
    pub community: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Sentinel POWER uses for missing values
    pub fill_value: f64,
}

/// Which forecasting strategy to run
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// Seasonal when compiled in, otherwise autoregressive
    Auto,
    Seasonal,
    Arima,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    pub model: ModelChoice,

    /// Days forecast ahead of the last historical date
    pub horizon_days: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyntheticConfig {
    /// Fixed RNG seed; unset means a fresh entropy seed per request
    pub seed: Option<u64>,

    /// Days of history the baseline averages are taken over
    pub history_days: i64,

    /// Days synthesized per request
    pub days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WFS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("power.base_url", DEFAULT_POWER_URL)?
            .set_default("power.community", DEFAULT_COMMUNITY)?
            .set_default("power.timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64)?
            .set_default("power.fill_value", DEFAULT_FILL_VALUE)?
            .set_default("forecast.model", "auto")?
            .set_default("forecast.horizon_days", DEFAULT_HORIZON_DAYS as i64)?
            .set_default("synthetic.history_days", DEFAULT_HISTORY_DAYS)?
            .set_default("synthetic.days", i64::from(DEFAULT_SYNTHETIC_DAYS))?
            .set_default("cors.allowed_origins", DEFAULT_ALLOWED_ORIGINS.to_vec())?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WFS_ prefix)
            .add_source(
                Environment::with_prefix("WFS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request of some shape fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.horizon_days < MIN_HORIZON_DAYS {
            return Err(ConfigError::Message(format!(
                "forecast.horizon_days must be at least {} (got {})",
                MIN_HORIZON_DAYS, self.forecast.horizon_days
            )));
        }
        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            power: PowerConfig::default(),
            forecast: ForecastConfig::default(),
            synthetic: SyntheticConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POWER_URL.to_string(),
            community: DEFAULT_COMMUNITY.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            fill_value: DEFAULT_FILL_VALUE,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model: ModelChoice::Auto,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_days: DEFAULT_HISTORY_DAYS,
            days: DEFAULT_SYNTHETIC_DAYS,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
