//! Environment-driven settings.
//!
//! Read once at startup (after `dotenvy::dotenv()`) and passed into the
//! service constructors; nothing reads the environment afterwards.

use std::env;

use crate::error::{WeatherError, WeatherResult};

/// Gateway configuration, sourced from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenWeather API key. Required.
    pub openweather_api_key: String,
    /// Base URL for the current-weather/forecast endpoints.
    pub openweather_base_url: String,
    /// Geocoding endpoint URL.
    pub geocoding_url: String,
    /// IP geolocation endpoint URL.
    pub ip_api_url: String,
    /// Redis connection URL for the cache store.
    pub redis_url: String,
    /// Default cache TTL in seconds; also the weather-entry TTL.
    pub cache_ttl: u64,
    /// TTL for geocoding entries. Coordinates are long-lived.
    pub geocoding_cache_ttl: u64,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// Fails only when `OPENWEATHER_API_KEY` is missing; everything else
    /// has a default matching a local development setup.
    pub fn from_env() -> WeatherResult<Self> {
        let openweather_api_key = env::var("OPENWEATHER_API_KEY")
            .map_err(|_| WeatherError::Config("OPENWEATHER_API_KEY is not set".to_string()))?;

        Ok(Self {
            openweather_api_key,
            openweather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
            geocoding_url: env::var("OPENWEATHER_GEOCODING_URL")
                .unwrap_or_else(|_| "http://api.openweathermap.org/geo/1.0/direct".to_string()),
            ip_api_url: env::var("IP_API_URL")
                .unwrap_or_else(|_| "http://ip-api.com/json".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            cache_ttl: env_u64("CACHE_TTL", 300),
            geocoding_cache_ttl: env_u64("GEOCODING_CACHE_TTL", 86400),
        })
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_u64_default() {
        assert_eq!(env_u64("WEATHER_GATEWAY_UNSET_TTL", 300), 300);
    }
}
