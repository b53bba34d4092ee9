//! Request counters for the metrics endpoint.

use std::sync::atomic::AtomicU64;

/// Per-route request counters. All fields are atomic for lock-free reads
/// from the metrics endpoint.
#[derive(Default)]
pub struct Metrics {
    pub weather_requests: AtomicU64,
    pub alerts_requests: AtomicU64,
    pub location_requests: AtomicU64,
    pub passthrough_requests: AtomicU64,
}
