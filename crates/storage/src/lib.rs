//! Cache store for the weather gateway.
//!
//! A key-value store with per-entry TTL used to memoize geocoding results,
//! weather readings and alert lists. The store is purely advisory: the typed
//! [`Cache`] wrapper absorbs every backend failure and reports it as a miss,
//! so callers never handle store-level errors.

mod backend;
mod cache;
mod memory;

pub use backend::{CacheBackend, RedisBackend};
pub use cache::{Cache, CacheStats};
pub use memory::MemoryBackend;
