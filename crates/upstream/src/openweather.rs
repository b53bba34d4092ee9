//! OpenWeather-compatible provider client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use weather_common::{Coordinate, Settings, WeatherError, WeatherResult};

use crate::types::{CurrentConditions, CurrentWeatherBody, ForecastBody, GeoMatch};

/// Outbound weather/geocoding API consumed by the lookup services and the
/// pass-through routes. Implemented by [`OpenWeatherClient`]; substituted
/// with a stub in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a free-text city name to candidate coordinates.
    /// An empty result set means the provider knows no such city.
    async fn geocode(&self, city: &str) -> WeatherResult<Vec<GeoMatch>>;

    /// Current conditions in metric units for the cached lookup path.
    async fn current_weather(&self, coord: &Coordinate) -> WeatherResult<CurrentConditions>;

    /// Raw current-weather body by coordinate (Kelvin, pass-through).
    async fn current_by_coord(&self, coord: &Coordinate) -> WeatherResult<CurrentWeatherBody>;

    /// Raw forecast body by coordinate (Kelvin, pass-through).
    async fn forecast_by_coord(&self, coord: &Coordinate) -> WeatherResult<ForecastBody>;

    /// Raw current-weather body by free-text query (`city` or `city,country`).
    async fn current_by_query(&self, query: &str) -> WeatherResult<CurrentWeatherBody>;

    /// Raw forecast body by free-text query.
    async fn forecast_by_query(&self, query: &str) -> WeatherResult<ForecastBody>;
}

/// HTTP client for an OpenWeather-compatible provider.
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
    geocoding_url: String,
}

impl OpenWeatherClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            api_key: settings.openweather_api_key.clone(),
            base_url: settings.openweather_base_url.clone(),
            geocoding_url: settings.geocoding_url.clone(),
        }
    }

    /// Fetch a pass-through body without checking the HTTP status; the
    /// provider reports errors through the `cod` field in the body.
    async fn fetch_value(&self, url: &str, query: &[(&str, String)]) -> WeatherResult<Value> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::Internal(format!("request failed: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| WeatherError::Internal(format!("response was not JSON: {}", e)))
    }
}

/// Extract the provider's error message, falling back to a call-site default.
fn provider_message(body: &Value, default: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Check the integer success discriminator used by the current-weather
/// endpoint. The forecast endpoint uses a string "200" instead; both checks
/// mirror the provider contract and must not be unified.
fn check_cod_int(body: &Value, default_msg: &str) -> WeatherResult<()> {
    if body.get("cod").and_then(Value::as_i64) != Some(200) {
        return Err(WeatherError::Upstream(provider_message(body, default_msg)));
    }
    Ok(())
}

fn check_cod_str(body: &Value, default_msg: &str) -> WeatherResult<()> {
    if body.get("cod").and_then(Value::as_str) != Some("200") {
        return Err(WeatherError::Upstream(provider_message(body, default_msg)));
    }
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> WeatherResult<T> {
    serde_json::from_value(body)
        .map_err(|e| WeatherError::Upstream(format!("invalid provider response: {}", e)))
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, city: &str) -> WeatherResult<Vec<GeoMatch>> {
        debug!(city = %city, "Geocoding lookup");

        let response = self
            .http
            .get(&self.geocoding_url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Internal(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(WeatherError::Upstream(format!(
                "geocoding request failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(format!("invalid geocoding response: {}", e)))
    }

    async fn current_weather(&self, coord: &Coordinate) -> WeatherResult<CurrentConditions> {
        debug!(lat = coord.lat, lon = coord.lon, "Current weather fetch");

        let url = format!("{}/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", coord.lat.to_string()),
                ("lon", coord.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Internal(format!("request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound("weather data not found".to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(WeatherError::Upstream(provider_message(
                &body,
                &format!("weather request failed with status {}", status),
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(format!("invalid provider response: {}", e)))
    }

    async fn current_by_coord(&self, coord: &Coordinate) -> WeatherResult<CurrentWeatherBody> {
        let url = format!("{}/weather", self.base_url);
        let body = self
            .fetch_value(
                &url,
                &[
                    ("lat", coord.lat.to_string()),
                    ("lon", coord.lon.to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        check_cod_int(&body, "Weather data not found")?;
        decode(body)
    }

    async fn forecast_by_coord(&self, coord: &Coordinate) -> WeatherResult<ForecastBody> {
        let url = format!("{}/forecast", self.base_url);
        let body = self
            .fetch_value(
                &url,
                &[
                    ("lat", coord.lat.to_string()),
                    ("lon", coord.lon.to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        check_cod_str(&body, "Forecast data not found")?;
        decode(body)
    }

    async fn current_by_query(&self, query: &str) -> WeatherResult<CurrentWeatherBody> {
        let url = format!("{}/weather", self.base_url);
        let body = self
            .fetch_value(
                &url,
                &[("q", query.to_string()), ("appid", self.api_key.clone())],
            )
            .await?;

        check_cod_int(&body, "City not found")?;
        decode(body)
    }

    async fn forecast_by_query(&self, query: &str) -> WeatherResult<ForecastBody> {
        let url = format!("{}/forecast", self.base_url);
        let body = self
            .fetch_value(
                &url,
                &[("q", query.to_string()), ("appid", self.api_key.clone())],
            )
            .await?;

        check_cod_str(&body, "City not found")?;
        decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cod_int_accepts_integer_200_only() {
        assert!(check_cod_int(&json!({"cod": 200}), "nope").is_ok());
        // The provider sends errors with a *string* cod even on this endpoint.
        assert!(check_cod_int(&json!({"cod": "200"}), "nope").is_err());
        assert!(check_cod_int(&json!({"cod": "404", "message": "city not found"}), "nope").is_err());
        assert!(check_cod_int(&json!({}), "nope").is_err());
    }

    #[test]
    fn test_cod_str_accepts_string_200_only() {
        assert!(check_cod_str(&json!({"cod": "200"}), "nope").is_ok());
        assert!(check_cod_str(&json!({"cod": 200}), "nope").is_err());
    }

    #[test]
    fn test_provider_message_prefers_upstream_text() {
        let body = json!({"cod": "404", "message": "city not found"});
        assert_eq!(provider_message(&body, "Weather data not found"), "city not found");

        // Forecast success bodies carry a numeric `message`; not an error text.
        let body = json!({"cod": "200", "message": 0});
        assert_eq!(provider_message(&body, "fallback"), "fallback");
    }
}
