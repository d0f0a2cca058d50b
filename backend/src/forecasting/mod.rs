//! Time-series forecasting
//!
//! Two interchangeable strategies behind [`ForecastStrategy`]: seasonal
//! decomposition (MSTL + ETS, behind the `seasonal` feature) and an
//! autoregressive ARIMA(5,1,0). The strategy is picked once at startup and
//! held by [`Forecaster`]. A failed fit falls through to the autoregressive
//! model and finally to a flat historical mean, so forecasting never fails.
//! Output that strays far outside the historical range counts as a failed
//! fit.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use shared::{mean, ForecastPoint};
use thiserror::Error;

use crate::config::ModelChoice;

pub mod autoregressive;
pub mod harmonic;
#[cfg(feature = "seasonal")]
pub mod seasonal;

pub use autoregressive::AutoregressiveStrategy;
#[cfg(feature = "seasonal")]
pub use seasonal::SeasonalStrategy;

/// Default forecast horizon in days
pub const DEFAULT_HORIZON_DAYS: usize = 365;

#[derive(Debug, Error, PartialEq)]
pub enum ModelFitError {
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("normal equations are singular")]
    Singular,

    #[error("model produced non-finite values")]
    NonFinite,

    #[error("model error: {0}")]
    Model(String),

    #[error("forecast value {value} outside plausible range [{low}, {high}]")]
    Implausible { value: f64, low: f64, high: f64 },
}

/// Bounds a forecast must stay within, derived from the history.
///
/// Points may leave the observed range by one span (max − min) on either
/// side, interval bounds by three. The span is at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibleRange {
    min: f64,
    max: f64,
    span: f64,
}

impl PlausibleRange {
    const MIN_SPAN: f64 = 1.0;
    const INTERVAL_SPANS: f64 = 3.0;

    pub fn from_history(values: &[f64]) -> Self {
        let min = shared::min(values);
        let max = shared::max(values);
        Self {
            min,
            max,
            span: (max - min).max(Self::MIN_SPAN),
        }
    }

    /// Range allowed for point forecasts
    pub fn points(&self) -> (f64, f64) {
        (self.min - self.span, self.max + self.span)
    }

    /// Range allowed for interval bounds
    pub fn intervals(&self) -> (f64, f64) {
        let margin = self.span * Self::INTERVAL_SPANS;
        (self.min - margin, self.max + margin)
    }

    pub fn check(&self, out: &ForecastValues) -> Result<(), ModelFitError> {
        let (low, high) = self.points();
        within(&out.point, low, high)?;
        let (low, high) = self.intervals();
        within(&out.lower, low, high)?;
        within(&out.upper, low, high)
    }
}

fn within(values: &[f64], low: f64, high: f64) -> Result<(), ModelFitError> {
    match values.iter().find(|v| **v < low || **v > high) {
        Some(value) => Err(ModelFitError::Implausible {
            value: *value,
            low,
            high,
        }),
        None => Ok(()),
    }
}

/// Point forecasts with their bands, one entry per future day
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastValues {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ForecastValues {
    /// Band of ±10% around each point
    pub fn with_proportional_band(point: Vec<f64>) -> Self {
        let lower = point.iter().map(|v| v * 0.9).collect();
        let upper = point.iter().map(|v| v * 1.1).collect();
        Self {
            point,
            lower,
            upper,
        }
    }

    pub fn len(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    fn is_finite(&self) -> bool {
        self.point
            .iter()
            .chain(&self.lower)
            .chain(&self.upper)
            .all(|v| v.is_finite())
    }
}

/// A forecasting model fitted and run in one call
pub trait ForecastStrategy: Send + Sync {
    /// Name reported to clients
    fn name(&self) -> &'static str;

    fn fit_predict(&self, values: &[f64], horizon: usize)
        -> Result<ForecastValues, ModelFitError>;
}

/// Every future day forecasts the historical mean, band ±10%
pub fn flat_mean_forecast(values: &[f64], horizon: usize) -> ForecastValues {
    ForecastValues::with_proportional_band(vec![mean(values); horizon])
}

/// Forecast result with the model that produced it
#[derive(Debug, Clone)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
    pub model_used: &'static str,
}

/// The strategy resolved at startup
#[derive(Clone)]
pub struct Forecaster {
    primary: Arc<dyn ForecastStrategy>,
    horizon_days: usize,
}

impl Forecaster {
    pub fn new(primary: Arc<dyn ForecastStrategy>, horizon_days: usize) -> Self {
        Self {
            primary,
            horizon_days,
        }
    }

    /// Resolve the configured model choice against the compiled features
    pub fn resolve(choice: ModelChoice, horizon_days: usize) -> Self {
        let primary: Arc<dyn ForecastStrategy> = match choice {
            ModelChoice::Arima => Arc::new(AutoregressiveStrategy::default()),
            #[cfg(feature = "seasonal")]
            ModelChoice::Auto | ModelChoice::Seasonal => Arc::new(SeasonalStrategy::default()),
            #[cfg(not(feature = "seasonal"))]
            ModelChoice::Auto => Arc::new(AutoregressiveStrategy::default()),
            #[cfg(not(feature = "seasonal"))]
            ModelChoice::Seasonal => {
                tracing::warn!(
                    "Seasonal model requested but not compiled in, using autoregressive model"
                );
                Arc::new(AutoregressiveStrategy::default())
            }
        };

        tracing::info!(model = primary.name(), horizon_days, "Forecaster resolved");
        Self::new(primary, horizon_days)
    }

    pub fn model_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Forecast `horizon_days` days after `last_date`.
    ///
    /// CPU bound; callers on the async runtime should run it on a blocking
    /// thread.
    pub fn forecast(&self, values: &[f64], last_date: NaiveDate) -> Forecast {
        let horizon = self.horizon_days;
        let (values_out, model_used) = self.run_chain(values, horizon);

        let points = (0..horizon)
            .map(|i| ForecastPoint {
                date: last_date + Duration::days(i as i64 + 1),
                value: values_out.point[i],
                lower: values_out.lower[i],
                upper: values_out.upper[i],
            })
            .collect();

        Forecast { points, model_used }
    }

    fn run_chain(&self, values: &[f64], horizon: usize) -> (ForecastValues, &'static str) {
        match checked(self.primary.as_ref(), values, horizon) {
            Ok(out) => return (out, self.primary.name()),
            Err(e) => tracing::warn!(
                model = self.primary.name(),
                error = %e,
                "Primary model failed"
            ),
        }

        let autoregressive = AutoregressiveStrategy::default();
        if self.primary.name() != autoregressive.name() {
            match checked(&autoregressive, values, horizon) {
                Ok(out) => return (out, autoregressive.name()),
                Err(e) => tracing::warn!(error = %e, "Autoregressive model failed"),
            }
        }

        tracing::warn!("Falling back to flat historical mean");
        (flat_mean_forecast(values, horizon), autoregressive.name())
    }
}

/// Run a strategy and reject output of the wrong length, with non-finite
/// values or outside the plausible range of the history
fn checked(
    strategy: &dyn ForecastStrategy,
    values: &[f64],
    horizon: usize,
) -> Result<ForecastValues, ModelFitError> {
    let out = strategy.fit_predict(values, horizon)?;
    if out.point.len() != horizon || out.lower.len() != horizon || out.upper.len() != horizon {
        return Err(ModelFitError::Model(format!(
            "expected {} forecast values, got {}",
            horizon,
            out.len()
        )));
    }
    if !out.is_finite() {
        return Err(ModelFitError::NonFinite);
    }
    PlausibleRange::from_history(values).check(&out)?;
    Ok(out)
}
