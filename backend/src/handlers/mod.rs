//! HTTP request handlers

pub mod forecast;
pub mod health;
pub mod historical;
pub mod rainfall;

pub use forecast::generate_forecast;
pub use health::{health_check, root};
pub use historical::historical_summary;
pub use rainfall::{predict_rainfall, thirty_day_forecast};
