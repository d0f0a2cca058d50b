//! Seasonal decomposition forecasting using augurs (MSTL + ETS).
//!
//! Weekly (7) and yearly (365) seasonal components are removed by MSTL and the
//! remainder is forecast with an AutoETS trend model. A period is only given
//! to MSTL when the series covers at least two full cycles of it; with no
//! usable period AutoETS runs on its own.
//!
//! Series covering one to two years carry the yearly cycle as a fitted
//! harmonic instead: it is subtracted before the fit and added back to the
//! forecast and its interval.
//!
//! Multiplicative mode (fit on the natural log, exponentiate back) is only
//! used when MSTL carries the yearly period and every value is strictly
//! positive. Everything else is fitted additively.

use augurs::{
    ets::AutoETS,
    forecaster::{transforms::LinearInterpolator, Forecaster, Transformer},
    mstl::MSTLModel,
};

use super::harmonic::{YearlyHarmonic, MIN_HARMONIC_DAYS};
use super::{ForecastStrategy, ForecastValues, ModelFitError};

/// Seasonal periods considered, in days
pub const SEASONAL_PERIODS: [usize; 2] = [7, 365];

const YEARLY_PERIOD: usize = 365;

/// Prediction interval level
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// MSTL + AutoETS strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalStrategy;

impl SeasonalStrategy {
    /// Periods with at least two full cycles in a series of `len` points
    pub fn usable_periods(len: usize) -> Vec<usize> {
        SEASONAL_PERIODS
            .iter()
            .copied()
            .filter(|period| len >= 2 * period)
            .collect()
    }
}

impl ForecastStrategy for SeasonalStrategy {
    fn name(&self) -> &'static str {
        "MSTL"
    }

    fn fit_predict(&self, values: &[f64], horizon: usize) -> Result<ForecastValues, ModelFitError> {
        let periods = Self::usable_periods(values.len());
        let yearly_in_mstl = periods.contains(&YEARLY_PERIOD);

        if !yearly_in_mstl && values.len() >= MIN_HARMONIC_DAYS {
            let harmonic = YearlyHarmonic::fit(values)?;
            tracing::debug!(?periods, ?harmonic, "Fitting seasonal model on harmonic residuals");

            let residual = fit_additive(&harmonic.residuals(values), periods, horizon)?;
            let cycle = harmonic.extend(values.len(), horizon);
            let add = |series: Vec<f64>| -> Vec<f64> {
                series.iter().zip(&cycle).map(|(v, c)| v + c).collect()
            };

            return Ok(ForecastValues {
                point: add(residual.point),
                lower: add(residual.lower),
                upper: add(residual.upper),
            });
        }

        let multiplicative = yearly_in_mstl && values.iter().all(|v| *v > 0.0);
        tracing::debug!(?periods, multiplicative, "Fitting seasonal model");

        if !multiplicative {
            return fit_additive(values, periods, horizon);
        }

        let logged: Vec<f64> = values.iter().map(|v| v.ln()).collect();
        let out = fit_additive(&logged, periods, horizon)?;
        let exp = |series: Vec<f64>| -> Vec<f64> { series.iter().map(|v| v.exp()).collect() };
        Ok(ForecastValues {
            point: exp(out.point),
            lower: exp(out.lower),
            upper: exp(out.upper),
        })
    }
}

/// Fit `values` as given and return point forecasts with intervals
fn fit_additive(
    values: &[f64],
    periods: Vec<usize>,
    horizon: usize,
) -> Result<ForecastValues, ModelFitError> {
    let forecast = if periods.is_empty() {
        forecast_with_ets(values, horizon)?
    } else {
        forecast_with_mstl(values, periods, horizon)?
    };

    let intervals = forecast
        .intervals
        .ok_or_else(|| ModelFitError::Model("model returned no intervals".into()))?;

    Ok(ForecastValues {
        point: forecast.point,
        lower: intervals.lower,
        upper: intervals.upper,
    })
}

fn transformers() -> Vec<Box<dyn Transformer>> {
    vec![Box::new(LinearInterpolator::default())]
}

/// Forecast using MSTL with an AutoETS trend model.
fn forecast_with_mstl(
    values: &[f64],
    periods: Vec<usize>,
    horizon: usize,
) -> Result<augurs::Forecast, ModelFitError> {
    let ets = AutoETS::non_seasonal().into_trend_model();
    let mstl = MSTLModel::new(periods, ets);
    let mut forecaster = Forecaster::new(mstl).with_transformers(transformers());

    forecaster
        .fit(values)
        .map_err(|e| ModelFitError::Model(format!("MSTL fit error: {e}")))?;

    forecaster
        .predict(horizon, CONFIDENCE_LEVEL)
        .map_err(|e| ModelFitError::Model(format!("MSTL predict error: {e}")))
}

/// Forecast using AutoETS alone (no seasonal decomposition).
fn forecast_with_ets(values: &[f64], horizon: usize) -> Result<augurs::Forecast, ModelFitError> {
    let ets = AutoETS::non_seasonal();
    let mut forecaster = Forecaster::new(ets).with_transformers(transformers());

    forecaster
        .fit(values)
        .map_err(|e| ModelFitError::Model(format!("ETS fit error: {e}")))?;

    forecaster
        .predict(horizon, CONFIDENCE_LEVEL)
        .map_err(|e| ModelFitError::Model(format!("ETS predict error: {e}")))
}
