//! Pass-through weather and forecast endpoints.
//!
//! These forward the provider's raw body to the caller: no caching, no
//! geocoding, no units conversion (temperatures stay in Kelvin). The
//! provider reports errors in-band through its `cod` field; a mismatch
//! surfaces as 400 with the provider's own message.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use upstream::{CurrentWeatherBody, ForecastBody};
use weather_common::{Coordinate, WeatherError};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoordQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
    pub country: Option<String>,
}

impl CityQuery {
    /// Provider query string: `city` or `city,country`.
    fn to_query(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.city, country),
            None => self.city.clone(),
        }
    }
}

fn pass_through_error(err: WeatherError, context: &str) -> ApiError {
    match err {
        WeatherError::Upstream(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
        err => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}: {}", context, err),
        ),
    }
}

/// GET /api/weather?lat&lon - Raw current weather by coordinates.
#[instrument(skip(state))]
pub async fn weather_by_coord_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<CurrentWeatherBody>, ApiError> {
    state.metrics.passthrough_requests.fetch_add(1, Ordering::Relaxed);
    info!(lat = query.lat, lon = query.lon, "Pass-through weather request");

    let coord = Coordinate { lat: query.lat, lon: query.lon };
    state
        .provider
        .current_by_coord(&coord)
        .await
        .map(Json)
        .map_err(|err| pass_through_error(err, "Failed to get weather data"))
}

/// GET /api/forecast?lat&lon - Raw 5-day forecast by coordinates.
#[instrument(skip(state))]
pub async fn forecast_by_coord_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<ForecastBody>, ApiError> {
    state.metrics.passthrough_requests.fetch_add(1, Ordering::Relaxed);
    info!(lat = query.lat, lon = query.lon, "Pass-through forecast request");

    let coord = Coordinate { lat: query.lat, lon: query.lon };
    state
        .provider
        .forecast_by_coord(&coord)
        .await
        .map(Json)
        .map_err(|err| pass_through_error(err, "Failed to get forecast data"))
}

/// GET /api/weather-by-city?city&country - Raw current weather by city name.
#[instrument(skip(state))]
pub async fn weather_by_city_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<CurrentWeatherBody>, ApiError> {
    state.metrics.passthrough_requests.fetch_add(1, Ordering::Relaxed);
    info!(city = %query.city, "Pass-through weather-by-city request");

    state
        .provider
        .current_by_query(&query.to_query())
        .await
        .map(Json)
        .map_err(|err| pass_through_error(err, "Failed to get weather data"))
}

/// GET /api/forecast-by-city?city&country - Raw forecast by city name.
#[instrument(skip(state))]
pub async fn forecast_by_city_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<ForecastBody>, ApiError> {
    state.metrics.passthrough_requests.fetch_add(1, Ordering::Relaxed);
    info!(city = %query.city, "Pass-through forecast-by-city request");

    state
        .provider
        .forecast_by_query(&query.to_query())
        .await
        .map(Json)
        .map_err(|err| pass_through_error(err, "Failed to get forecast data"))
}
