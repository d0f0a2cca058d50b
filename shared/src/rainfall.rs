//! Rainfall risk heuristic
//!
//! Maps temperature (°C), relative humidity (%) and surface pressure (hPa) to
//! a rainfall probability, an expected amount, a risk level and a confidence
//! score. The thresholds below are the contract; clients compare against
//! them directly.

use crate::models::{RainfallAssessment, RiskLevel};
use crate::types::round_to;

/// Standard sea-level pressure (hPa)
pub const STANDARD_PRESSURE_HPA: f64 = 1013.0;

const MIN_PROBABILITY: f64 = 0.05;
const MAX_PROBABILITY: f64 = 0.95;
const MAX_CONFIDENCE: f64 = 0.95;

/// Weighted score before humidity dampening and clamping
pub fn base_score(temperature: f64, humidity: f64, pressure: f64) -> f64 {
    let pressure_deviation = (pressure - STANDARD_PRESSURE_HPA).abs();
    let humidity_factor = ((humidity - 40.0) / 60.0).clamp(0.0, 1.0);
    let pressure_factor = if pressure < STANDARD_PRESSURE_HPA {
        (pressure_deviation / 30.0).min(1.0)
    } else {
        0.0
    };

    0.5 * humidity_factor + 0.3 * pressure_factor + 0.2 * temperature_factor(temperature)
}

fn temperature_factor(temperature: f64) -> f64 {
    if (15.0..=25.0).contains(&temperature) {
        0.8
    } else if (10.0..15.0).contains(&temperature) || (temperature > 25.0 && temperature <= 30.0) {
        0.5
    } else {
        0.2
    }
}

fn humidity_dampening(humidity: f64) -> f64 {
    if humidity < 50.0 {
        0.3
    } else if humidity < 70.0 {
        0.6
    } else {
        1.0
    }
}

/// Expected rainfall (mm) for a probability at a given humidity
pub fn expected_rainfall_mm(probability: f64, humidity: f64) -> f64 {
    let multiplier = if probability > 0.7 {
        15.0
    } else if probability > 0.4 {
        8.0
    } else {
        3.0
    };
    humidity / 100.0 * probability * multiplier
}

/// High needs both a likely and a heavy event; either alone is moderate
pub fn classify_risk(probability: f64, predicted_mm: f64) -> RiskLevel {
    if probability > 0.65 && predicted_mm > 8.0 {
        RiskLevel::High
    } else if probability > 0.35 || predicted_mm > 3.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn confidence(temperature: f64, humidity: f64, pressure: f64) -> f64 {
    let mut confidence: f64 = 0.6;
    if humidity > 80.0 || humidity < 30.0 {
        confidence += 0.15;
    }
    if (pressure - STANDARD_PRESSURE_HPA).abs() > 20.0 {
        confidence += 0.15;
    }
    if (15.0..=25.0).contains(&temperature) {
        confidence += 0.10;
    }
    confidence.min(MAX_CONFIDENCE)
}

/// Estimate rainfall risk for a single set of conditions.
///
/// Probability is rounded to 3 decimals and the amount to 2 before the risk
/// level is derived, so the returned values always satisfy the
/// [`classify_risk`] thresholds.
pub fn predict_rainfall(temperature: f64, humidity: f64, pressure: f64) -> RainfallAssessment {
    let damped = base_score(temperature, humidity, pressure) * humidity_dampening(humidity);
    let probability = round_to(damped.clamp(MIN_PROBABILITY, MAX_PROBABILITY), 3);

    let predicted_mm = round_to(expected_rainfall_mm(probability, humidity).max(0.0), 2);

    RainfallAssessment {
        rainfall_probability: probability,
        risk_level: classify_risk(probability, predicted_mm),
        predicted_rainfall_mm: predicted_mm,
        confidence: round_to(confidence(temperature, humidity, pressure), 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_humid_low_pressure_ideal_temperature() {
        let result = predict_rainfall(20.0, 90.0, 995.0);

        // 0.5 * 50/60 + 0.3 * 18/30 + 0.2 * 0.8
        assert_eq!(result.rainfall_probability, 0.757);
        // 0.9 * 0.757 * 15
        assert!(approx(result.predicted_rainfall_mm, 10.22, 0.011));
        assert_eq!(result.risk_level, RiskLevel::High);
        // 0.6 + 0.15 (humid) + 0.10 (ideal temperature)
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_dry_high_pressure_hits_probability_floor() {
        let result = predict_rainfall(35.0, 20.0, 1030.0);

        // humidity factor 0, pressure factor 0, temp factor 0.2 -> 0.04 * 0.3
        assert_eq!(result.rainfall_probability, MIN_PROBABILITY);
        // 0.2 * 0.05 * 3
        assert_eq!(result.predicted_rainfall_mm, 0.03);
        assert_eq!(result.risk_level, RiskLevel::Low);
        // 0.6 + 0.15 (dry)
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_moderate_humidity_dampening() {
        // humidity 60 -> factor 1/3, pressure neutral, temp 20 -> 0.8
        // base = 0.16667 + 0 + 0.16 = 0.32667, * 0.6 = 0.196
        let result = predict_rainfall(20.0, 60.0, 1013.0);
        assert_eq!(result.rainfall_probability, 0.196);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_probability_ceiling() {
        // base = 0.5 + 0.3 + 0.16 = 0.96 -> clamped
        let result = predict_rainfall(20.0, 100.0, 950.0);
        assert_eq!(result.rainfall_probability, MAX_PROBABILITY);
        assert!(approx(result.predicted_rainfall_mm, 14.25, 1e-9));
        assert_eq!(result.risk_level, RiskLevel::High);
        // 0.6 + 0.15 + 0.15 + 0.10 capped
        assert_eq!(result.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_temperature_factor_boundaries() {
        assert_eq!(temperature_factor(15.0), 0.8);
        assert_eq!(temperature_factor(25.0), 0.8);
        assert_eq!(temperature_factor(10.0), 0.5);
        assert_eq!(temperature_factor(14.99), 0.5);
        assert_eq!(temperature_factor(25.01), 0.5);
        assert_eq!(temperature_factor(30.0), 0.5);
        assert_eq!(temperature_factor(30.01), 0.2);
        assert_eq!(temperature_factor(9.99), 0.2);
    }

    #[test]
    fn test_humidity_dampening_boundaries() {
        assert_eq!(humidity_dampening(49.9), 0.3);
        assert_eq!(humidity_dampening(50.0), 0.6);
        assert_eq!(humidity_dampening(69.9), 0.6);
        assert_eq!(humidity_dampening(70.0), 1.0);
    }

    #[test]
    fn test_pressure_above_standard_adds_nothing() {
        let at_standard = base_score(20.0, 80.0, 1013.0);
        let above = base_score(20.0, 80.0, 1040.0);
        assert_eq!(at_standard, above);
    }

    #[test]
    fn test_amount_tiers() {
        assert!(approx(expected_rainfall_mm(0.71, 100.0), 0.71 * 15.0, 1e-12));
        assert!(approx(expected_rainfall_mm(0.7, 100.0), 0.7 * 8.0, 1e-12));
        assert!(approx(expected_rainfall_mm(0.41, 50.0), 0.5 * 0.41 * 8.0, 1e-12));
        assert!(approx(expected_rainfall_mm(0.4, 50.0), 0.5 * 0.4 * 3.0, 1e-12));
    }

    #[test]
    fn test_classify_risk_boundaries() {
        assert_eq!(classify_risk(0.65, 8.0), RiskLevel::Moderate);
        assert_eq!(classify_risk(0.66, 8.01), RiskLevel::High);
        assert_eq!(classify_risk(0.65, 9.0), RiskLevel::Moderate);
        assert_eq!(classify_risk(0.9, 8.0), RiskLevel::Moderate);
        assert_eq!(classify_risk(0.35, 3.0), RiskLevel::Low);
        assert_eq!(classify_risk(0.351, 0.0), RiskLevel::Moderate);
        assert_eq!(classify_risk(0.1, 3.01), RiskLevel::Moderate);
    }

    #[test]
    fn test_confidence_pressure_deviation_boundary() {
        // deviation exactly 20 does not count
        assert_eq!(predict_rainfall(5.0, 50.0, 993.0).confidence, 0.6);
        assert_eq!(predict_rainfall(5.0, 50.0, 992.9).confidence, 0.75);
    }

    #[test]
    fn test_identical_inputs_identical_outputs() {
        let first = predict_rainfall(18.5, 77.0, 1001.0);
        let second = predict_rainfall(18.5, 77.0, 1001.0);
        assert_eq!(first, second);
    }
}
