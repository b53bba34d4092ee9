//! Domain models shared between the lookup services and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair produced by the geocoding resolver or supplied
/// directly by the caller. Immutable once obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Normalized current-weather reading (metric units).
///
/// Created fresh on every upstream fetch or reconstructed whole from the
/// cache; never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, 0-100.
    pub humidity: i64,
    /// Atmospheric pressure in hPa.
    pub pressure: i64,
    pub description: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Time of the lookup, not the provider's data time.
    pub timestamp: DateTime<Utc>,
}

/// Category of a synthetic weather alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Temperature,
    Wind,
    Rain,
}

/// Severity of a synthetic weather alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    High,
}

/// A synthetically generated alert record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub city: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Response body for the alerts endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertRecord>,
    pub total: usize,
    pub cached: bool,
}
