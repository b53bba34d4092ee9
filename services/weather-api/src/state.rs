//! Application state and shared resources.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use storage::{Cache, CacheBackend, RedisBackend};
use upstream::{GeoLocator, IpApiClient, OpenWeatherClient, WeatherProvider};
use weather_common::Settings;
use weather_core::{AlertsService, WeatherService};

use crate::metrics::Metrics;

/// Shared application state, built once at startup and injected into every
/// handler. Tests assemble it from an in-memory backend and stub providers.
pub struct AppState {
    pub cache: Arc<Cache>,
    pub weather: WeatherService,
    pub alerts: AlertsService,
    pub provider: Arc<dyn WeatherProvider>,
    pub locator: Arc<dyn GeoLocator>,
    pub metrics: Metrics,
}

impl AppState {
    /// Connect to Redis and the upstream providers from settings.
    pub async fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        let backend = RedisBackend::connect(&settings.redis_url)
            .await
            .context("Failed to connect to Redis")?;

        let provider = Arc::new(OpenWeatherClient::new(http.clone(), settings));
        let locator = Arc::new(IpApiClient::new(http, settings.ip_api_url.clone()));

        Ok(Self::assemble(Arc::new(backend), provider, locator, settings))
    }

    /// Wire the services onto the given backend and providers.
    pub fn assemble(
        backend: Arc<dyn CacheBackend>,
        provider: Arc<dyn WeatherProvider>,
        locator: Arc<dyn GeoLocator>,
        settings: &Settings,
    ) -> Self {
        let cache = Arc::new(Cache::new(backend, settings.cache_ttl));
        let weather = WeatherService::new(
            cache.clone(),
            provider.clone(),
            settings.cache_ttl,
            settings.geocoding_cache_ttl,
        );
        let alerts = AlertsService::new(cache.clone());

        Self {
            cache,
            weather,
            alerts,
            provider,
            locator,
            metrics: Metrics::default(),
        }
    }
}
