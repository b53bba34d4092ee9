//! Cached current-weather endpoint.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument};

use weather_common::{WeatherError, WeatherReading};

use super::ApiError;
use crate::state::AppState;

/// GET /weather/:city - Current weather for a city, metric units.
#[instrument(skip(state))]
pub async fn weather_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, ApiError> {
    state.metrics.weather_requests.fetch_add(1, Ordering::Relaxed);
    info!(city = %city, "Weather request");

    match state.weather.current_weather(&city).await {
        Ok(reading) => Ok(Json(reading)),
        Err(err @ WeatherError::NotFound(_)) => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Weather data not found for {}: {}", city, err),
        )),
        Err(err) => {
            error!(city = %city, error = %err, "Weather lookup failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch weather data: {}", err),
            ))
        }
    }
}
