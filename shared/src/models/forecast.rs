//! Forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weather::{max, mean, min};

/// Number of leading forecast days summarised as "the next three months"
pub const FORECAST_WINDOW_DAYS: usize = 90;

/// One day's point forecast with its uncertainty band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Summary of the first [`FORECAST_WINDOW_DAYS`] forecast values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastWindowStats {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

impl ForecastWindowStats {
    pub fn from_points(points: &[ForecastPoint]) -> Self {
        let values: Vec<f64> = points
            .iter()
            .take(FORECAST_WINDOW_DAYS)
            .map(|p| p.value)
            .collect();

        Self {
            avg: mean(&values),
            max: max(&values),
            min: min(&values),
        }
    }
}

/// Highest upper bound across the whole horizon
pub fn max_upper(points: &[ForecastPoint]) -> f64 {
    let uppers: Vec<f64> = points.iter().map(|p| p.upper).collect();
    max(&uppers)
}

/// Lowest lower bound across the whole horizon
pub fn min_lower(points: &[ForecastPoint]) -> f64 {
    let lowers: Vec<f64> = points.iter().map(|p| p.lower).collect();
    min(&lowers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn points(values: &[f64]) -> Vec<ForecastPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ForecastPoint {
                date: start + Duration::days(i as i64),
                value: *v,
                lower: v - 1.0,
                upper: v + 1.0,
            })
            .collect()
    }

    #[test]
    fn test_window_ignores_days_after_ninety() {
        let mut values = vec![10.0; FORECAST_WINDOW_DAYS];
        values.extend(vec![50.0; 10]);

        let stats = ForecastWindowStats::from_points(&points(&values));
        assert_eq!(stats.avg, 10.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.min, 10.0);
    }

    #[test]
    fn test_band_extremes_cover_whole_horizon() {
        let mut values = vec![10.0; FORECAST_WINDOW_DAYS];
        values.push(50.0);
        values.push(-5.0);

        let pts = points(&values);
        assert_eq!(max_upper(&pts), 51.0);
        assert_eq!(min_lower(&pts), -6.0);
    }
}
