//! # Store Contract
//!
//! Every eviction policy in this crate exposes the same narrow capability
//! set through [`CacheStore`]. Callers pick a policy at construction time and
//! drive it only through this trait; nothing here exposes ordering lists,
//! frequency buckets or scores.
//!
//! ```text
//!                ┌──────────────────────────────────────────┐
//!                │            CacheStore<K, V>              │
//!                │                                          │
//!                │  get(&mut, &K) → Option<&V>   hit/miss   │
//!                │  put(&mut, K, V) → Option<(K, V)>        │
//!                │  contains(&, &K) → bool       no effects │
//!                │  len / is_empty / capacity               │
//!                │  clear(&mut)                  keeps stats│
//!                │  stats(&) → CacheStats                   │
//!                └───────────────────┬──────────────────────┘
//!                                    │
//!          ┌─────────────────────────┼─────────────────────────┐
//!          ▼                         ▼                         ▼
//!   ┌──────────────┐         ┌──────────────┐         ┌──────────────────┐
//!   │  LruCache    │         │  LfuCache    │         │  HybridCache     │
//!   │ recency list │         │ freq buckets │         │ scan + score     │
//!   └──────────────┘         └──────────────┘         └──────────────────┘
//! ```
//!
//! | Operation  | Counters touched        | Reorders entries |
//! |------------|-------------------------|------------------|
//! | `get`      | hits or misses          | on hit           |
//! | `put`      | evictions (if evicting) | yes              |
//! | `contains` | none                    | no               |
//! | `clear`    | none                    | removes all      |
//!
//! ## Thread Safety
//!
//! Stores are single-threaded and hold no locks. Wrap a store in a `Mutex`
//! if it has to be shared; every operation then needs the lock.

use crate::metrics::{CacheStats, StatsSnapshot};

/// Fixed-capacity key-value store with a built-in eviction policy.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CacheStore;
///
/// fn replay<C: CacheStore<u32, u32>>(cache: &mut C, pages: &[u32]) {
///     for &page in pages {
///         if cache.get(&page).is_none() {
///             cache.put(page, page);
///         }
///     }
/// }
///
/// let mut cache = LruCache::new(2);
/// replay(&mut cache, &[1, 2, 1, 3, 1]);
/// assert_eq!(cache.hits(), 2);
/// assert_eq!(cache.misses(), 3);
/// assert_eq!(cache.evictions(), 1);
/// ```
pub trait CacheStore<K, V> {
    /// Looks up `key`.
    ///
    /// A hit counts a hit and refreshes the entry's policy metadata; a miss
    /// counts a miss and returns `None`.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or updates `key`.
    ///
    /// Updating an existing key never evicts. Inserting a new key into a
    /// full store first evicts one entry, which is returned.
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    /// use evictkit::traits::CacheStore;
    ///
    /// let mut cache = LruCache::new(1);
    /// assert_eq!(cache.put("a", 1), None);
    /// assert_eq!(cache.put("a", 2), None);
    /// assert_eq!(cache.put("b", 3), Some(("a", 2)));
    /// ```
    fn put(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Presence check with no side effects on ordering or counters.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Drops every entry. Hit/miss/eviction counters are kept.
    fn clear(&mut self);

    /// Current counters.
    fn stats(&self) -> CacheStats;

    /// Short policy label used in snapshots and exports.
    fn policy_name(&self) -> &'static str;

    fn hits(&self) -> u64 {
        self.stats().hits
    }

    fn misses(&self) -> u64 {
        self.stats().misses
    }

    fn evictions(&self) -> u64 {
        self.stats().evictions
    }

    /// `hits / (hits + misses)`, `0.0` before any lookup.
    fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }

    /// Counters plus occupancy, labelled with the policy.
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(self.policy_name(), self.stats(), self.len(), self.capacity())
    }
}
