//! Validation utilities for forecast and rainfall requests

use chrono::NaiveDate;

use crate::types::{parse_compact_date, DateRange};

/// Longest forecast horizon a client may ask for
pub const MAX_FORECAST_MONTHS: u32 = 12;

// ============================================================================
// Location
// ============================================================================

pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)
}

// ============================================================================
// Dates
// ============================================================================

/// Validate a `YYYYMMDD` date string and return the parsed date
pub fn validate_compact_date(value: &str) -> Result<NaiveDate, &'static str> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("Dates must be in YYYYMMDD format");
    }
    parse_compact_date(value).map_err(|_| "Date is not a valid calendar date")
}

/// Validate an inclusive `YYYYMMDD` range
pub fn validate_date_range(start: &str, end: &str) -> Result<DateRange, &'static str> {
    let start = validate_compact_date(start)?;
    let end = validate_compact_date(end)?;
    if start > end {
        return Err("start_date must not be after end_date");
    }
    Ok(DateRange::new(start, end))
}

// ============================================================================
// Forecast & Conditions
// ============================================================================

pub fn validate_forecast_months(months: u32) -> Result<(), &'static str> {
    if months == 0 || months > MAX_FORECAST_MONTHS {
        return Err("forecast_months must be between 1 and 12");
    }
    Ok(())
}

/// Relative humidity in percent
pub fn validate_humidity(humidity: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&humidity) {
        return Err("Humidity must be between 0 and 100");
    }
    Ok(())
}

/// Surface pressure in hPa
pub fn validate_pressure(pressure: f64) -> Result<(), &'static str> {
    if !(pressure > 0.0 && pressure <= 2000.0) {
        return Err("Pressure must be greater than 0 and at most 2000 hPa");
    }
    Ok(())
}

pub fn validate_temperature(temperature: f64) -> Result<(), &'static str> {
    if !temperature.is_finite() {
        return Err("Temperature must be a finite number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Location Tests
    // ========================================================================

    #[test]
    fn test_coordinates_valid() {
        assert!(validate_coordinates(40.7128, -74.0060).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_coordinates_invalid() {
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
    }

    // ========================================================================
    // Date Tests
    // ========================================================================

    #[test]
    fn test_compact_date() {
        assert_eq!(
            validate_compact_date("20240115"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert!(validate_compact_date("2024-01-15").is_err());
        assert!(validate_compact_date("20241332").is_err());
        assert!(validate_compact_date("2024011").is_err());
    }

    #[test]
    fn test_date_range() {
        let range = validate_date_range("20230101", "20231231").unwrap();
        assert_eq!(range.days(), 365);

        assert!(validate_date_range("20240101", "20240101").is_ok());
        assert!(validate_date_range("20240102", "20240101").is_err());
    }

    // ========================================================================
    // Forecast & Conditions Tests
    // ========================================================================

    #[test]
    fn test_forecast_months() {
        assert!(validate_forecast_months(1).is_ok());
        assert!(validate_forecast_months(12).is_ok());
        assert!(validate_forecast_months(0).is_err());
        assert!(validate_forecast_months(13).is_err());
    }

    #[test]
    fn test_humidity_and_pressure() {
        assert!(validate_humidity(0.0).is_ok());
        assert!(validate_humidity(100.0).is_ok());
        assert!(validate_humidity(100.1).is_err());
        assert!(validate_pressure(1013.0).is_ok());
        assert!(validate_pressure(0.0).is_err());
        assert!(validate_pressure(2000.1).is_err());
    }

    #[test]
    fn test_temperature_must_be_finite() {
        assert!(validate_temperature(-40.0).is_ok());
        assert!(validate_temperature(f64::INFINITY).is_err());
    }
}
