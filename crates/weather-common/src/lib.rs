//! Shared types for the weather gateway services.
//!
//! Contains the error taxonomy, the domain models exchanged between the
//! lookup crates and the HTTP layer, and environment-driven settings.

mod config;
mod error;
mod types;

pub use config::Settings;
pub use error::{WeatherError, WeatherResult};
pub use types::{
    AlertRecord, AlertType, AlertsResponse, Coordinate, Severity, WeatherReading,
};
