//! IP geolocation endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    extract::{ConnectInfo, Extension},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{info, instrument, warn};

use upstream::GeoIpInfo;

use super::ApiError;
use crate::state::AppState;

/// GET /api/location - Location data for the caller's IP address.
///
/// The client IP is taken from `x-forwarded-for`, then `x-real-ip`, then the
/// socket peer address. Loopback callers are looked up with an empty path
/// segment, which the provider resolves to the server's public address.
#[instrument(skip(state, headers, connect_info))]
pub async fn location_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<GeoIpInfo>, ApiError> {
    state.metrics.location_requests.fetch_add(1, Ordering::Relaxed);

    let client_ip = client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let query = client_ip.as_deref().filter(|ip| !is_loopback(ip));
    info!(client_ip = ?client_ip, "Location request");

    match state.locator.locate(query).await {
        Ok(info) => Ok(Json(info)),
        Err(err) => {
            warn!(error = %err, "Location lookup failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get location: {}", err),
            ))
        }
    }
}

/// Pick the client IP, preferring proxy headers over the peer address.
/// `x-forwarded-for` may carry a hop list; the first entry is the client.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return Some(real_ip.trim().to_string());
    }

    peer.map(|addr| addr.ip().to_string())
}

fn is_loopback(ip: &str) -> bool {
    matches!(ip, "127.0.0.1" | "localhost" | "::1")
}
