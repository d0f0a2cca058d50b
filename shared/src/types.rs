//! Common types used across the service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the POWER API and the forecast request body
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Date range for queries (inclusive on both ends)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered by the range
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Period with ISO datetime bounds, as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: iso_midnight(start),
            end: iso_midnight(end),
        }
    }
}

/// Parse a `YYYYMMDD` date
pub fn parse_compact_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, COMPACT_DATE_FORMAT)
}

/// Format a date as `YYYYMMDD`
pub fn format_compact_date(date: NaiveDate) -> String {
    date.format(COMPACT_DATE_FORMAT).to_string()
}

/// Format a date as an ISO datetime at midnight, e.g. `2024-03-01T00:00:00`
pub fn iso_midnight(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
