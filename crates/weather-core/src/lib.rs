//! Cache-augmented weather lookups.
//!
//! The core of the gateway: given a city name, resolve it to coordinates
//! (geocoding), fetch current weather keyed by those coordinates, and
//! memoize each stage behind a TTL cache. Also hosts the synthetic alerts
//! generator. Cache failures never surface; upstream failures propagate as
//! typed errors.

pub mod alerts;
pub mod keys;
mod service;

pub use alerts::AlertsService;
pub use service::WeatherService;
