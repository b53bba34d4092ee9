//! Synthetic weather alerts.
//!
//! Alerts are generated deterministically rather than fetched; there is no
//! real alerts upstream. Generated lists are still cached so the endpoint
//! exercises the same TTL path as the lookups.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use storage::Cache;
use weather_common::{AlertRecord, AlertType, Severity};

use crate::keys;

/// Cities covered by the global alerts feed.
const GLOBAL_CITIES: [&str; 4] = ["London", "New York", "Tokyo", "Sydney"];

/// Deterministic alert generator with a cache in front.
pub struct AlertsService {
    cache: Arc<Cache>,
}

impl AlertsService {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }

    /// Alerts for one city, or the fixed global list when no city is given.
    ///
    /// Cached under `alerts:<city>` / `alerts:global` with the default TTL.
    pub async fn alerts(&self, city: Option<&str>) -> Vec<AlertRecord> {
        let key = keys::alerts(city);

        if let Some(alerts) = self.cache.get::<Vec<AlertRecord>>(&key).await {
            debug!(key = %key, "Alerts cache hit");
            return alerts;
        }

        let alerts = generate(city);
        self.cache.set(&key, &alerts, None).await;
        alerts
    }
}

fn generate(city: Option<&str>) -> Vec<AlertRecord> {
    match city {
        Some(city) => vec![AlertRecord {
            id: format!("alert_{}_001", city.to_lowercase()),
            city: city.to_string(),
            alert_type: AlertType::Temperature,
            severity: Severity::Moderate,
            description: format!("High temperature warning for {}", city),
            start_time: Utc::now(),
            end_time: None,
        }],
        None => GLOBAL_CITIES
            .iter()
            .enumerate()
            .map(|(i, city)| AlertRecord {
                id: format!("alert_global_{:03}", i + 1),
                city: city.to_string(),
                alert_type: if i % 2 == 0 {
                    AlertType::Wind
                } else {
                    AlertType::Rain
                },
                severity: if i % 3 == 0 {
                    Severity::High
                } else {
                    Severity::Moderate
                },
                description: format!("Weather alert for {}", city),
                start_time: Utc::now(),
                end_time: None,
            })
            .collect(),
    }
}
