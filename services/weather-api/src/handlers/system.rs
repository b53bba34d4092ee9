//! Service info, health check and metrics endpoints.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::state::AppState;

/// GET / - Service info and endpoint map.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Weather API with Redis Caching",
        "endpoints": {
            "weather": "/weather/{city}",
            "alerts": "/alerts",
            "city_alerts": "/alerts/{city}",
            "location": "/api/location",
            "weather_by_coordinates": "/api/weather",
            "forecast_by_coordinates": "/api/forecast",
            "weather_by_city": "/api/weather-by-city",
            "forecast_by_city": "/api/forecast-by-city"
        }
    }))
}

/// GET /health - Basic health check.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "weather-api" }))
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let cache_stats = state.cache.stats();

    let mut output = String::new();

    output.push_str(&format!(
        "# HELP weather_requests_total Total cached weather requests\n# TYPE weather_requests_total counter\nweather_requests_total {}\n",
        state.metrics.weather_requests.load(Ordering::Relaxed)
    ));
    output.push_str(&format!(
        "# HELP alerts_requests_total Total alerts requests\n# TYPE alerts_requests_total counter\nalerts_requests_total {}\n",
        state.metrics.alerts_requests.load(Ordering::Relaxed)
    ));
    output.push_str(&format!(
        "# HELP location_requests_total Total IP geolocation requests\n# TYPE location_requests_total counter\nlocation_requests_total {}\n",
        state.metrics.location_requests.load(Ordering::Relaxed)
    ));
    output.push_str(&format!(
        "# HELP passthrough_requests_total Total pass-through weather/forecast requests\n# TYPE passthrough_requests_total counter\npassthrough_requests_total {}\n",
        state.metrics.passthrough_requests.load(Ordering::Relaxed)
    ));

    output.push_str(&format!(
        "# HELP cache_hits_total Total cache hits\n# TYPE cache_hits_total counter\ncache_hits_total {}\n",
        cache_stats.hits.load(Ordering::Relaxed)
    ));
    output.push_str(&format!(
        "# HELP cache_misses_total Total cache misses\n# TYPE cache_misses_total counter\ncache_misses_total {}\n",
        cache_stats.misses.load(Ordering::Relaxed)
    ));
    output.push_str(&format!(
        "# HELP cache_errors_total Total cache errors absorbed as misses\n# TYPE cache_errors_total counter\ncache_errors_total {}\n",
        cache_stats.errors.load(Ordering::Relaxed)
    ));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        output,
    )
}
