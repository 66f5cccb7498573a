//! Freshness cache - TTL-bounded deduplication of repeated lookups
//!
//! A key → (value, timestamp) store with a fixed time-to-live. Staleness is
//! evaluated at read time; a stale entry is not proactively evicted, only
//! superseded by the next successful `put` for the same key. Repeated
//! identical requests inside the TTL window must yield identical results
//! without re-invoking the fetcher - a correctness floor, not a
//! performance optimization.
//!
//! No capacity bound is enforced, matching the reference behavior; this is
//! acceptable only while identity cardinality stays bounded.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

/// Default time-to-live: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// TTL cache over normalized identity keys.
///
/// Reads and writes of a given key are linearizable through the map lock;
/// readers of the same key always observe a consistent entry snapshot.
pub struct FreshnessCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> FreshnessCache<V> {
    /// Cache with the default five-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Cache with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, or `None` when never written or when the
    /// entry's age has reached the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            debug!(key, "cache entry stale");
            return None;
        }
        debug!(key, "cache hit");
        Some(entry.value.clone())
    }

    /// Store `value` under `key`, superseding any previous entry.
    pub fn put(&self, key: &str, value: V) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}

impl<V: Clone> Default for FreshnessCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
