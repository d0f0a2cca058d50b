//! Business logic services

pub mod forecast;
pub mod historical;
pub mod rainfall;

pub use forecast::ForecastService;
pub use historical::HistoricalService;
pub use rainfall::RainfallService;

use shared::{validate_date_range, DateRange};
use validator::ValidationError;

use crate::error::{AppError, AppResult};

/// `validator` hook for `YYYYMMDD` string fields
pub(crate) fn validate_compact_date_field(value: &str) -> Result<(), ValidationError> {
    shared::validate_compact_date(value).map(|_| ()).map_err(|message| {
        let mut error = ValidationError::new("compact_date");
        error.message = Some(message.into());
        error
    })
}

/// Parse an inclusive request date range, rejecting start after end
pub(crate) fn request_date_range(start: &str, end: &str) -> AppResult<DateRange> {
    validate_date_range(start, end).map_err(|message| AppError::Validation(message.to_string()))
}
