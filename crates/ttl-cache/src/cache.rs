use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::types::{CacheEntry, CacheStats};

/// Key/value cache whose entries expire a fixed duration after insertion
///
/// Expired entries are dropped when they are next read. The map lock is
/// never held across an await point, so the cache can be shared freely
/// between request tasks.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache driven by the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Store `value` under `key` until `now + ttl`, replacing any existing entry
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at = expiry(self.clock.now(), ttl);
        self.entries
            .lock()
            .insert(key, CacheEntry { value, expires_at });
    }

    /// Return the value if present and unexpired
    ///
    /// An expired entry is removed as a side effect.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let expired = matches!(entries.get(key), Some(entry) if !entry.is_valid_at(now));
        if expired {
            entries.remove(key);
            trace!("Evicted expired cache entry");
        }

        let value = entries.get(key).map(|entry| entry.value.clone());
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Remove an entry regardless of its expiry
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.lock().remove(key).map(|entry| entry.value)
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    fn cache_with_clock() -> (TtlCache<String, i32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        ));
        (TtlCache::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_get_missing_key() {
        let (cache, _) = cache_with_clock();
        assert_eq!(cache.get("berlin"), None);
    }

    #[test]
    fn test_set_then_get() {
        let (cache, _) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        assert_eq!(cache.get("berlin"), Some(21));
    }

    #[test]
    fn test_value_survives_until_just_before_expiry() {
        let (cache, clock) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        clock.advance(TimeDelta::seconds(299));
        assert_eq!(cache.get("berlin"), Some(21));
    }

    #[test]
    fn test_value_expires_at_ttl_boundary() {
        let (cache, clock) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        clock.advance(TimeDelta::seconds(300));
        assert_eq!(cache.get("berlin"), None);
    }

    #[test]
    fn test_expired_entry_is_removed_on_read() {
        let (cache, clock) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        cache.set("tokyo".to_string(), 30, Duration::from_secs(3600));
        clock.advance(TimeDelta::minutes(10));

        // Nothing is swept until the key is read
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("berlin"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("tokyo"), Some(30));
    }

    #[test]
    fn test_set_overwrites_value_and_expiry() {
        let (cache, clock) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        clock.advance(TimeDelta::minutes(4));
        cache.set("berlin".to_string(), 22, FIVE_MINUTES);
        clock.advance(TimeDelta::minutes(4));
        assert_eq!(cache.get("berlin"), Some(22));
    }

    #[test]
    fn test_remove() {
        let (cache, _) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        assert_eq!(cache.remove("berlin"), Some(21));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats_count_hits_and_misses() {
        let (cache, _) = cache_with_clock();
        cache.set("berlin".to_string(), 21, FIVE_MINUTES);
        cache.get("berlin");
        cache.get("berlin");
        cache.get("paris");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let (cache, _) = cache_with_clock();
        cache.set("berlin".to_string(), 21, Duration::MAX);
        assert_eq!(cache.get("berlin"), Some(21));
    }
}
