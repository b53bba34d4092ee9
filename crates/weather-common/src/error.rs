//! Error types for the weather gateway.

use thiserror::Error;

/// Result type alias using WeatherError.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Primary error type for weather lookups.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// City yields no upstream match, or the provider returned 404.
    #[error("{0}")]
    NotFound(String),

    /// Provider reachable but returned an unexpected status or payload.
    #[error("{0}")]
    Upstream(String),

    /// Cache read/write/connectivity failure. Absorbed at the cache
    /// boundary; never surfaced to callers of the lookup services.
    #[error("cache error: {0}")]
    Cache(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl WeatherError {
    /// HTTP status code for this error at the handler boundary.
    ///
    /// `Upstream` maps to 500 here; pass-through call sites override it
    /// to 400 since they carry the provider's own error message.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WeatherError::NotFound(_) => 404,
            WeatherError::Upstream(_) => 500,
            WeatherError::Cache(_) | WeatherError::Config(_) | WeatherError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Internal(format!("JSON error: {}", err))
    }
}
