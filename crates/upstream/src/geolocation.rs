//! IP geolocation client (ip-api compatible).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use weather_common::{WeatherError, WeatherResult};

use crate::types::GeoIpInfo;

/// IP-to-location lookup. Implemented by [`IpApiClient`]; substituted with a
/// stub in tests.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Look up location data for `ip`. `None` queries with an empty path
    /// segment, which the provider resolves to the caller's public address;
    /// used when the inbound request came from loopback.
    async fn locate(&self, ip: Option<&str>) -> WeatherResult<GeoIpInfo>;
}

/// HTTP client for an ip-api-compatible geolocation provider.
pub struct IpApiClient {
    http: Client,
    base_url: String,
}

impl IpApiClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GeoLocator for IpApiClient {
    async fn locate(&self, ip: Option<&str>) -> WeatherResult<GeoIpInfo> {
        let url = format!("{}/{}", self.base_url, ip.unwrap_or(""));
        debug!(ip = ?ip, "IP geolocation lookup");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::Internal(format!("request failed: {}", e)))?;

        // The provider reports failures in-band: a 200 response with
        // status "fail" and a message. Forwarded to the caller unmodified.
        response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(format!("invalid geolocation response: {}", e)))
    }
}
