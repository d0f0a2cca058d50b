//! NASA POWER API client for fetching daily point data
//!
//! Pulls mean temperature at 2m (T2M), corrected precipitation (PRECTOTCORR)
//! and wind speed at 2m (WS2M) for a coordinate and an inclusive date range.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{
    format_compact_date, parse_compact_date, DailyRecord, DateRange, GpsCoordinates,
    HistoricalSeries, SeriesError,
};
use thiserror::Error;

use crate::config::PowerConfig;

/// Daily parameters requested from POWER
pub const POWER_PARAMETERS: &str = "T2M,PRECTOTCORR,WS2M";

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("POWER API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("POWER API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse POWER response: {0}")]
    Parse(String),

    #[error(transparent)]
    NoData(#[from] SeriesError),
}

/// NASA POWER daily point client
#[derive(Clone)]
pub struct PowerClient {
    client: Client,
    base_url: String,
    community: String,
    fill_value: f64,
}

/// POWER API response, reduced to the parameter maps
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "T2M")]
    temperature: BTreeMap<String, Option<f64>>,
    #[serde(rename = "PRECTOTCORR", default)]
    rainfall: HashMap<String, Option<f64>>,
    #[serde(rename = "WS2M", default)]
    windspeed: HashMap<String, Option<f64>>,
}

impl PowerClient {
    /// Create a new PowerClient from configuration
    pub fn new(config: &PowerConfig) -> Result<Self, PowerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            community: config.community.clone(),
            fill_value: config.fill_value,
        })
    }

    /// Fetch daily weather for a point. One outbound call, no retries.
    pub async fn fetch_daily(
        &self,
        location: GpsCoordinates,
        range: DateRange,
    ) -> Result<HistoricalSeries, PowerError> {
        let start = format_compact_date(range.start);
        let end = format_compact_date(range.end);
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        tracing::debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            %start,
            %end,
            "Fetching POWER daily data"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("parameters", POWER_PARAMETERS),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("format", "JSON"),
                ("community", self.community.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PowerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let series = parse_power_response(&body, self.fill_value)?;

        tracing::info!(days = series.len(), "POWER data retrieved");
        Ok(series)
    }
}

/// Parse a POWER daily JSON body into a series.
///
/// Dates come from the temperature map. A day whose temperature is missing or
/// equals `fill_value` is dropped; missing or fill-valued rainfall and wind
/// default to 0.
pub fn parse_power_response(body: &str, fill_value: f64) -> Result<HistoricalSeries, PowerError> {
    let data: PowerResponse =
        serde_json::from_str(body).map_err(|e| PowerError::Parse(e.to_string()))?;
    let parameters = data.properties.parameter;

    let is_fill = |value: f64| (value - fill_value).abs() < 1e-9;
    let reading = |map: &HashMap<String, Option<f64>>, key: &str| {
        map.get(key)
            .copied()
            .flatten()
            .filter(|v| !is_fill(*v))
            .unwrap_or(0.0)
    };

    let mut records = Vec::with_capacity(parameters.temperature.len());
    for (key, temperature) in &parameters.temperature {
        let date = parse_compact_date(key)
            .map_err(|e| PowerError::Parse(format!("invalid date key '{}': {}", key, e)))?;

        let Some(temperature) = temperature.filter(|t| !is_fill(*t)) else {
            continue;
        };

        records.push(DailyRecord {
            date,
            temperature,
            rainfall: reading(&parameters.rainfall, key),
            windspeed: reading(&parameters.windspeed, key),
        });
    }

    Ok(HistoricalSeries::from_records(records)?)
}
