//! Geocoding resolver and current-weather lookup.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use storage::Cache;
use upstream::WeatherProvider;
use weather_common::{Coordinate, WeatherError, WeatherReading, WeatherResult};

use crate::keys;

/// City-keyed weather lookup with a TTL cache in front of both stages.
///
/// Geocoding results are long-lived (default 24 h); weather readings are
/// short-lived (default 5 min). Concurrent misses on one key may both fetch
/// upstream; last write wins, which is benign since values are functions of
/// the key.
pub struct WeatherService {
    cache: Arc<Cache>,
    provider: Arc<dyn WeatherProvider>,
    weather_ttl: u64,
    geocoding_ttl: u64,
}

impl WeatherService {
    pub fn new(
        cache: Arc<Cache>,
        provider: Arc<dyn WeatherProvider>,
        weather_ttl: u64,
        geocoding_ttl: u64,
    ) -> Self {
        Self {
            cache,
            provider,
            weather_ttl,
            geocoding_ttl,
        }
    }

    /// Resolve a free-text city name to coordinates.
    ///
    /// Consults the cache first; on a miss asks the geocoding endpoint for
    /// the single best match. Fails with `NotFound` when the provider has
    /// no match. Only called for city-based requests; coordinate-based
    /// requests skip geocoding entirely.
    pub async fn resolve(&self, city: &str) -> WeatherResult<Coordinate> {
        let key = keys::geocoding(city);

        if let Some(coord) = self.cache.get::<Coordinate>(&key).await {
            debug!(city = %city, "Geocoding cache hit");
            return Ok(coord);
        }

        let matches = self.provider.geocode(city).await?;
        let best = matches
            .first()
            .ok_or_else(|| WeatherError::NotFound(format!("City '{}' not found", city)))?;

        let coord = Coordinate {
            lat: best.lat,
            lon: best.lon,
        };

        // Coordinates are stable; cache them for the long TTL.
        self.cache.set(&key, &coord, Some(self.geocoding_ttl)).await;

        info!(city = %city, lat = coord.lat, lon = coord.lon, "Geocoded city");
        Ok(coord)
    }

    /// Current weather for a city, in metric units.
    ///
    /// A cache hit skips geocoding and the upstream call entirely. On a
    /// miss the reading is rebuilt whole from the provider response and
    /// stamped with the lookup time, never the provider's data time.
    pub async fn current_weather(&self, city: &str) -> WeatherResult<WeatherReading> {
        let key = keys::weather(city);

        if let Some(reading) = self.cache.get::<WeatherReading>(&key).await {
            debug!(city = %city, "Weather cache hit");
            return Ok(reading);
        }

        let coord = self.resolve(city).await?;
        let conditions = self.provider.current_weather(&coord).await?;

        let description = conditions
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| {
                WeatherError::Upstream("provider response missing weather conditions".to_string())
            })?;

        let reading = WeatherReading {
            city: conditions.name,
            country: conditions.sys.country,
            temperature: conditions.main.temp,
            feels_like: conditions.main.feels_like,
            humidity: conditions.main.humidity,
            pressure: conditions.main.pressure,
            description,
            wind_speed: conditions.wind.speed,
            timestamp: Utc::now(),
        };

        self.cache.set(&key, &reading, Some(self.weather_ttl)).await;

        info!(city = %city, temperature = reading.temperature, "Fetched current weather");
        Ok(reading)
    }
}
