//! Yearly harmonic regression
//!
//! Least-squares fit of `a + b·sin(2πt/365.25) + c·cos(2πt/365.25)` over the
//! day index. Used to carry a yearly cycle through series too short for MSTL
//! to decompose one.

use std::f64::consts::PI;

use super::autoregressive::solve_linear_system;
use super::ModelFitError;

/// Mean length of a year in days
pub const YEAR_DAYS: f64 = 365.25;

/// Shortest series a yearly harmonic is fitted to: one full cycle
pub const MIN_HARMONIC_DAYS: usize = 365;

/// Fitted yearly cycle with its level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyHarmonic {
    pub intercept: f64,
    pub sin: f64,
    pub cos: f64,
}

fn basis(day: usize) -> [f64; 3] {
    let angle = 2.0 * PI * day as f64 / YEAR_DAYS;
    [1.0, angle.sin(), angle.cos()]
}

impl YearlyHarmonic {
    /// Fit over `values`, where index `i` is day `i`
    pub fn fit(values: &[f64]) -> Result<Self, ModelFitError> {
        if values.len() < MIN_HARMONIC_DAYS {
            return Err(ModelFitError::InsufficientData {
                required: MIN_HARMONIC_DAYS,
                actual: values.len(),
            });
        }

        let mut xtx = vec![vec![0.0; 3]; 3];
        let mut xty = vec![0.0; 3];
        for (day, value) in values.iter().enumerate() {
            let row = basis(day);
            for i in 0..3 {
                xty[i] += row[i] * value;
                for j in 0..3 {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let coefficients = solve_linear_system(xtx, xty)?;
        Ok(Self {
            intercept: coefficients[0],
            sin: coefficients[1],
            cos: coefficients[2],
        })
    }

    /// Value of the fitted cycle on day `day`
    pub fn at(&self, day: usize) -> f64 {
        let [one, sin, cos] = basis(day);
        self.intercept * one + self.sin * sin + self.cos * cos
    }

    /// `values` with the fitted cycle removed
    pub fn residuals(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .enumerate()
            .map(|(day, v)| v - self.at(day))
            .collect()
    }

    /// The cycle over the `horizon` days following a series of `len` days
    pub fn extend(&self, len: usize, horizon: usize) -> Vec<f64> {
        (len..len + horizon).map(|day| self.at(day)).collect()
    }
}
