//! Router assembly.

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the service router with all routes and middleware layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Service endpoints
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        // Cached lookup endpoints
        .route("/weather/:city", get(handlers::weather_handler))
        .route("/alerts", get(handlers::alerts_handler))
        .route("/alerts/:city", get(handlers::city_alerts_handler))
        // Pass-through endpoints
        .route("/api/location", get(handlers::location_handler))
        .route("/api/weather", get(handlers::weather_by_coord_handler))
        .route("/api/forecast", get(handlers::forecast_by_coord_handler))
        .route("/api/weather-by-city", get(handlers::weather_by_city_handler))
        .route("/api/forecast-by-city", get(handlers::forecast_by_city_handler))
        // Layer extensions
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
