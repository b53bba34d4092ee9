//! Typed, fail-open cache layer.
//!
//! Values are stored as JSON. Every backend or (de)serialization failure is
//! logged and converted into a miss / `false` result; this layer never
//! returns an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::backend::CacheBackend;

/// Hit/miss/error counters, lock-free for metrics reads.
#[derive(Default)]
pub struct CacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub errors: AtomicU64,
}

impl CacheStats {
    /// Cache hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

/// Typed cache over a [`CacheBackend`].
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    default_ttl: u64,
    stats: Arc<CacheStats>,
}

impl Cache {
    pub fn new(backend: Arc<dyn CacheBackend>, default_ttl: u64) -> Self {
        Self {
            backend,
            default_ttl,
            stats: Arc::new(CacheStats::default()),
        }
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Fetch and deserialize the value for `key`.
    ///
    /// Any backend failure or undecodable payload counts as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_raw(key).await {
            Ok(raw) => raw,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "Cache get failed");
                return None;
            }
        };

        let raw = match raw {
            Some(raw) => raw,
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "Cache entry undecodable, treating as miss");
                None
            }
        }
    }

    /// Serialize and store `value` under `key`.
    ///
    /// Uses the default TTL when `ttl_secs` is `None`. Returns whether the
    /// write succeeded; failure is logged, never raised.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: Option<u64>) -> bool {
        let ttl = ttl_secs.unwrap_or(self.default_ttl);

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "Cache set failed: unserializable value");
                return false;
            }
        };

        if let Err(e) = self.backend.set_raw(key, &raw, ttl).await {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
            warn!(key = %key, error = %e, "Cache set failed");
            return false;
        }
        true
    }

    /// Report presence without deserializing.
    pub async fn exists(&self, key: &str) -> bool {
        match self.backend.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "Cache exists check failed");
                false
            }
        }
    }

    /// Remove an entry. Absence is not an error.
    pub async fn delete(&self, key: &str) -> bool {
        match self.backend.delete(key).await {
            Ok(removed) => removed,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "Cache delete failed");
                false
            }
        }
    }
}
