//! Historical weather models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::round_to;

/// One day of observed weather at a point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Mean air temperature at 2m (°C)
    pub temperature: f64,
    /// Corrected total precipitation (mm/day)
    pub rainfall: f64,
    /// Wind speed at 2m (m/s)
    pub windspeed: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("No data available for specified location/dates")]
    Empty,
}

/// Daily observations ordered by date.
///
/// Never empty, strictly increasing dates, no duplicates. Built once and not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    records: Vec<DailyRecord>,
}

impl HistoricalSeries {
    /// Build a series from unordered records. Later duplicates of a date are
    /// dropped.
    pub fn from_records(records: impl IntoIterator<Item = DailyRecord>) -> Result<Self, SeriesError> {
        let mut by_date: BTreeMap<NaiveDate, DailyRecord> = BTreeMap::new();
        for record in records {
            by_date.entry(record.date).or_insert(record);
        }

        if by_date.is_empty() {
            return Err(SeriesError::Empty);
        }

        Ok(Self {
            records: by_date.into_values().collect(),
        })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.temperature).collect()
    }

    pub fn rainfall(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.rainfall).collect()
    }

    pub fn windspeeds(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.windspeed).collect()
    }

    /// Aggregate statistics over the whole series
    pub fn stats(&self) -> HistoricalStats {
        let temps = self.temperatures();
        let rain = self.rainfall();
        let wind = self.windspeeds();

        HistoricalStats {
            avg_temperature: mean(&temps),
            max_temperature: max(&temps),
            min_temperature: min(&temps),
            avg_rainfall: mean(&rain),
            max_rainfall: max(&rain),
            total_rainfall: rain.iter().sum(),
            avg_windspeed: mean(&wind),
            max_windspeed: max(&wind),
        }
    }
}

/// Aggregate statistics over a historical series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoricalStats {
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub avg_rainfall: f64,
    pub max_rainfall: f64,
    pub total_rainfall: f64,
    pub avg_windspeed: f64,
    pub max_windspeed: f64,
}

impl HistoricalStats {
    /// Copy with display rounding: temperatures and wind to 1 decimal,
    /// rainfall to 2
    pub fn rounded(&self) -> Self {
        Self {
            avg_temperature: round_to(self.avg_temperature, 1),
            max_temperature: round_to(self.max_temperature, 1),
            min_temperature: round_to(self.min_temperature, 1),
            avg_rainfall: round_to(self.avg_rainfall, 2),
            max_rainfall: round_to(self.max_rainfall, 2),
            total_rainfall: round_to(self.total_rainfall, 2),
            avg_windspeed: round_to(self.avg_windspeed, 1),
            max_windspeed: round_to(self.max_windspeed, 1),
        }
    }
}

/// Coarse risk category for a historical period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskCategory {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::High => write!(f, "High"),
            RiskCategory::Moderate => write!(f, "Moderate"),
            RiskCategory::Low => write!(f, "Low"),
        }
    }
}

/// Historical risk with the reasons that triggered it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalRisk {
    pub level: RiskCategory,
    pub reasons: Vec<String>,
}

/// Assess a historical period from its extremes.
///
/// Any extreme makes the period High; otherwise moderate rain or wind makes
/// it Moderate.
pub fn assess_historical_risk(stats: &HistoricalStats) -> HistoricalRisk {
    let mut reasons = Vec::new();

    if stats.max_rainfall > 20.0 {
        reasons.push(format!(
            "Heavy rainfall detected ({}mm)",
            round_to(stats.max_rainfall, 2)
        ));
    }
    if stats.max_windspeed > 15.0 {
        reasons.push(format!(
            "Strong winds detected ({} m/s)",
            round_to(stats.max_windspeed, 1)
        ));
    }
    if stats.max_temperature > 35.0 {
        reasons.push(format!(
            "Extreme heat detected ({}°C)",
            round_to(stats.max_temperature, 1)
        ));
    }
    if stats.min_temperature < 5.0 {
        reasons.push(format!(
            "Extreme cold detected ({}°C)",
            round_to(stats.min_temperature, 1)
        ));
    }

    if !reasons.is_empty() {
        return HistoricalRisk {
            level: RiskCategory::High,
            reasons,
        };
    }

    if stats.max_rainfall > 10.0 {
        reasons.push(format!(
            "Moderate rainfall ({}mm)",
            round_to(stats.max_rainfall, 2)
        ));
    }
    if stats.max_windspeed > 8.0 {
        reasons.push(format!(
            "Moderate winds ({} m/s)",
            round_to(stats.max_windspeed, 1)
        ));
    }

    if !reasons.is_empty() {
        return HistoricalRisk {
            level: RiskCategory::Moderate,
            reasons,
        };
    }

    HistoricalRisk {
        level: RiskCategory::Low,
        reasons: vec!["All weather conditions within normal ranges".to_string()],
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maximum; 0 for an empty slice
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Minimum; 0 for an empty slice
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}
