//! Cache backends.
//!
//! The backend trait deals in raw serialized strings; typed access and the
//! fail-open policy live in [`crate::Cache`].

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use weather_common::{WeatherError, WeatherResult};

/// A key-value store with per-entry expiry.
///
/// Implementations report failures as errors; the typed cache layer decides
/// what to do with them. All keys are plain strings, already namespaced by
/// the caller (`geocoding:…`, `weather:…`, `alerts:…`).
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch the serialized value for `key`, if present and unexpired.
    async fn get_raw(&self, key: &str) -> WeatherResult<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl_secs`. Overwrites any
    /// existing entry.
    async fn set_raw(&self, key: &str, value: &str, ttl_secs: u64) -> WeatherResult<()>;

    /// Report presence without fetching the value.
    async fn exists(&self, key: &str) -> WeatherResult<bool>;

    /// Remove an entry. Returns whether anything was removed; absence is
    /// not an error.
    async fn delete(&self, key: &str) -> WeatherResult<bool>;
}

/// Redis-backed cache store.
///
/// Holds one multiplexed connection established at process start and cloned
/// per operation; it is never explicitly closed.
pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> WeatherResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| WeatherError::Cache(format!("Redis connection failed: {}", e)))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| WeatherError::Cache(format!("Redis connection failed: {}", e)))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get_raw(&self, key: &str) -> WeatherResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| WeatherError::Cache(format!("Cache get failed: {}", e)))?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl_secs: u64) -> WeatherResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| WeatherError::Cache(format!("Cache set failed: {}", e)))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> WeatherResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| WeatherError::Cache(format!("Cache exists check failed: {}", e)))?;
        Ok(exists)
    }

    async fn delete(&self, key: &str) -> WeatherResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(key)
            .await
            .map_err(|e| WeatherError::Cache(format!("Cache delete failed: {}", e)))?;
        Ok(removed > 0)
    }
}
