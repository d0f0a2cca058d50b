//! ARIMA(p,1,0) without constant
//!
//! Coefficients come from conditional least squares on the first-differenced
//! series. Forecasts are produced one step at a time on the differences and
//! integrated back to levels. The band is the point value ±10%, not a
//! confidence interval.

use super::{ForecastStrategy, ForecastValues, ModelFitError};

const DEFAULT_ORDER: usize = 5;
const PIVOT_EPSILON: f64 = 1e-10;

/// Autoregressive strategy on first differences
#[derive(Debug, Clone, Copy)]
pub struct AutoregressiveStrategy {
    order: usize,
}

impl Default for AutoregressiveStrategy {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
        }
    }
}

impl AutoregressiveStrategy {
    pub fn with_order(order: usize) -> Self {
        Self { order }
    }

    /// Fewest observations that leave more regression rows than coefficients
    pub fn min_observations(&self) -> usize {
        2 * self.order + 2
    }

    /// Fit AR coefficients on the differenced series
    pub fn fit(&self, values: &[f64]) -> Result<Vec<f64>, ModelFitError> {
        let required = self.min_observations();
        if values.len() < required {
            return Err(ModelFitError::InsufficientData {
                required,
                actual: values.len(),
            });
        }

        let diffs = differences(values);
        let p = self.order;

        // Normal equations X'X phi = X'y, row t regresses diffs[t] on
        // diffs[t-1..=t-p]
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        for t in p..diffs.len() {
            for i in 0..p {
                let xi = diffs[t - 1 - i];
                xty[i] += xi * diffs[t];
                for j in 0..p {
                    xtx[i][j] += xi * diffs[t - 1 - j];
                }
            }
        }

        let coefficients = solve_linear_system(xtx, xty)?;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelFitError::NonFinite);
        }
        Ok(coefficients)
    }
}

impl ForecastStrategy for AutoregressiveStrategy {
    fn name(&self) -> &'static str {
        "ARIMA"
    }

    fn fit_predict(&self, values: &[f64], horizon: usize) -> Result<ForecastValues, ModelFitError> {
        let coefficients = self.fit(values)?;

        let mut diffs = differences(values);
        let mut level = values[values.len() - 1];
        let mut point = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let next: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(i, phi)| phi * diffs[diffs.len() - 1 - i])
                .sum();
            diffs.push(next);
            level += next;
            point.push(level);
        }

        if point.iter().any(|v| !v.is_finite()) {
            return Err(ModelFitError::NonFinite);
        }

        Ok(ForecastValues::with_proportional_band(point))
    }
}

fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Gaussian elimination with partial pivoting
pub(crate) fn solve_linear_system(
    mut a: Vec<Vec<f64>>,
    mut b: Vec<f64>,
) -> Result<Vec<f64>, ModelFitError> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(ModelFitError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
