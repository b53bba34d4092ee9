//! Alerts endpoints.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    extract::{Extension, Path},
    Json,
};
use tracing::{info, instrument};

use weather_common::AlertsResponse;
use weather_core::keys;

use crate::state::AppState;

/// GET /alerts - All weather alerts for the fixed global city list.
#[instrument(skip(state))]
pub async fn alerts_handler(Extension(state): Extension<Arc<AppState>>) -> Json<AlertsResponse> {
    state.metrics.alerts_requests.fetch_add(1, Ordering::Relaxed);

    // Reported before the lookup: whether this request was served from cache.
    let cached = state.cache.exists(&keys::alerts(None)).await;
    let alerts = state.alerts.alerts(None).await;

    info!(total = alerts.len(), cached = cached, "Alerts request");
    Json(AlertsResponse {
        total: alerts.len(),
        alerts,
        cached,
    })
}

/// GET /alerts/:city - Weather alerts scoped to one city.
#[instrument(skip(state))]
pub async fn city_alerts_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(city): Path<String>,
) -> Json<AlertsResponse> {
    state.metrics.alerts_requests.fetch_add(1, Ordering::Relaxed);

    let cached = state.cache.exists(&keys::alerts(Some(&city))).await;
    let alerts = state.alerts.alerts(Some(&city)).await;

    info!(city = %city, total = alerts.len(), cached = cached, "City alerts request");
    Json(AlertsResponse {
        total: alerts.len(),
        alerts,
        cached,
    })
}
