//! Shared types and models for the NASA POWER weather forecast service
//!
//! This crate contains the pure domain logic shared between the backend and
//! the browser bindings (via WASM): rainfall risk heuristics, synthetic daily
//! conditions, recommendations and validation. It performs no I/O.

pub mod conditions;
pub mod models;
pub mod rainfall;
pub mod recommendations;
pub mod types;
pub mod validation;

pub use conditions::*;
pub use models::*;
pub use rainfall::*;
pub use recommendations::*;
pub use types::*;
pub use validation::*;
