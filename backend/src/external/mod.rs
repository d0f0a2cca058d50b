//! External API integrations

pub mod power;

pub use power::{parse_power_response, PowerClient, PowerError};
