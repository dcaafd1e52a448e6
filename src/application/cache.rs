//! Time-bound retrieval cache.
//!
//! One [`CacheSlot`] holds one table's retrieval result behind an `Arc`.
//! Entries expire on their own TTL and there is no other invalidation; a
//! fresh load becomes visible after expiry or a process restart. The cache
//! is constructed explicitly and injected into the dashboard service, so
//! tests can substitute a zero-TTL cache to disable it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::domain::{
    ConsumerTrend, EmploymentStat, MarketMetric, ProductionRecord, RegulatoryStatus, TaxRevenue,
    TimelineEvent,
};

struct Entry<T> {
    stored_at: Instant,
    value: Arc<T>,
}

/// A single-value cache slot with a fixed time-to-live.
pub struct CacheSlot<T> {
    ttl: Duration,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T> CacheSlot<T> {
    /// Create an empty slot with the given TTL. A zero TTL disables caching.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value if it is still fresh.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        let guard = self.slot.read();
        guard
            .as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Store a value and return the shared handle to it.
    pub fn store(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.slot.write() = Some(Entry {
            stored_at: Instant::now(),
            value: Arc::clone(&value),
        });
        value
    }
}

/// One cache slot per warehouse table.
pub struct DashboardCache {
    pub production: CacheSlot<Vec<ProductionRecord>>,
    pub market: CacheSlot<Vec<MarketMetric>>,
    pub employment: CacheSlot<Vec<EmploymentStat>>,
    pub regulatory: CacheSlot<Vec<RegulatoryStatus>>,
    pub tax: CacheSlot<Vec<TaxRevenue>>,
    pub trends: CacheSlot<Vec<ConsumerTrend>>,
    pub timeline: CacheSlot<Vec<TimelineEvent>>,
}

impl DashboardCache {
    /// Create a cache where every table shares the same TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            production: CacheSlot::new(ttl),
            market: CacheSlot::new(ttl),
            employment: CacheSlot::new(ttl),
            regulatory: CacheSlot::new(ttl),
            tax: CacheSlot::new(ttl),
            trends: CacheSlot::new(ttl),
            timeline: CacheSlot::new(ttl),
        }
    }

    /// A cache that never serves a stored value. Used to disable caching.
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_ttl(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_is_served() {
        let slot = CacheSlot::new(Duration::from_secs(3600));
        assert!(slot.get().is_none());

        slot.store(vec![1, 2, 3]);

        let cached = slot.get().expect("entry should be fresh");
        assert_eq!(*cached, vec![1, 2, 3]);
    }

    #[test]
    fn zero_ttl_never_serves() {
        let slot = CacheSlot::new(Duration::ZERO);
        slot.store("value");
        assert!(slot.get().is_none());
    }

    #[test]
    fn store_replaces_previous_entry() {
        let slot = CacheSlot::new(Duration::from_secs(3600));
        slot.store(1);
        slot.store(2);
        assert_eq!(*slot.get().unwrap(), 2);
    }

    #[test]
    fn expired_entry_is_dropped() {
        let slot = CacheSlot::new(Duration::from_millis(1));
        slot.store("stale");
        std::thread::sleep(Duration::from_millis(5));
        assert!(slot.get().is_none());
    }

    #[test]
    fn disabled_cache_covers_every_table() {
        let cache = DashboardCache::disabled();
        cache.production.store(Vec::new());
        assert!(cache.production.get().is_none());
    }
}
