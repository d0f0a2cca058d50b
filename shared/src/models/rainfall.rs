//! Rainfall risk models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical rainfall risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Output of the rainfall risk heuristic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RainfallAssessment {
    /// In [0.05, 0.95], 3 decimals
    pub rainfall_probability: f64,
    pub risk_level: RiskLevel,
    /// Non-negative, 2 decimals
    pub predicted_rainfall_mm: f64,
    /// In [0, 0.95], 3 decimals
    pub confidence: f64,
}

/// One synthesized day of weather
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyCondition {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
}

/// A synthesized day with its rainfall assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPrediction {
    /// `YYYY-MM-DD`
    pub date: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub rainfall_probability: f64,
    pub predicted_rainfall_mm: f64,
    pub risk_level: RiskLevel,
    pub weather_description: String,
}

impl DailyPrediction {
    pub fn new(condition: &DailyCondition, assessment: &RainfallAssessment, description: &str) -> Self {
        Self {
            date: condition.date.format("%Y-%m-%d").to_string(),
            temperature: condition.temperature,
            humidity: condition.humidity,
            pressure: condition.pressure,
            wind_speed: condition.wind_speed,
            rainfall_probability: assessment.rainfall_probability,
            predicted_rainfall_mm: assessment.predicted_rainfall_mm,
            risk_level: assessment.risk_level,
            weather_description: description.to_string(),
        }
    }
}
