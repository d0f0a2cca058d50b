//! Domain models for the weather forecast service

mod forecast;
mod rainfall;
mod weather;

pub use forecast::*;
pub use rainfall::*;
pub use weather::*;
