//! # LRU (Least Recently Used) Store
//!
//! Evicts the entry whose last access lies furthest in the past.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                             │
//!   │                                                                    │
//!   │   index: FxHashMap<K, SlotId>                                      │
//!   │   ┌─────────┬────────┐                                             │
//!   │   │  page_3 │  id_2  │──┐                                          │
//!   │   │  page_1 │  id_0  │──┼──┐                                       │
//!   │   │  page_2 │  id_1  │──┼──┼──┐                                    │
//!   │   └─────────┴────────┘  │  │  │                                    │
//!   │                         ▼  ▼  ▼                                    │
//!   │   list: IntrusiveList<Entry<K, V>>                                 │
//!   │     head ─► [page_3] ◄──► [page_1] ◄──► [page_2] ◄── tail          │
//!   │              MRU                          LRU (next victim)        │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Effect                                            | Time |
//! |------------------|---------------------------------------------------|------|
//! | `get` hit        | hit +1, entry moves to MRU                        | O(1) |
//! | `get` miss       | miss +1                                           | O(1) |
//! | `put` existing   | value replaced, entry moves to MRU, no eviction   | O(1) |
//! | `put` new, full  | LRU entry evicted (evictions +1), new entry MRU   | O(1) |
//! | `contains`       | none                                              | O(1) |
//! | `clear`          | all entries dropped, counters kept                | O(n) |
//!
//! Recency order is total, so no tie-break is needed. A store built with
//! capacity 0 ignores puts of new keys.
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CacheStore;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "A");
//! cache.put(2, "B");
//! assert_eq!(cache.get(&1), Some(&"A"));
//!
//! // key 2 is now least recently used
//! assert_eq!(cache.put(3, "C"), Some((2, "B")));
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&1) && cache.contains(&3));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
use crate::metrics::CacheStats;
use crate::traits::CacheStore;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity store with least-recently-used eviction.
#[derive(Debug)]
pub struct LruCache<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Reads a value without touching recency or counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// The entry the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// Verifies capacity, index/list agreement and list links.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lru holds {} entries over capacity {}",
                self.len(),
                self.capacity
            )));
        }
        self.list.validate()?;
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "lru index has {} keys, list has {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        for (id, entry) in self.list.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "lru node {:?} is not indexed by its key",
                    id
                )));
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (_, entry) = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();

        #[cfg(feature = "tracing")]
        tracing::debug!(policy = "lru", len = self.list.len(), "evicted least recently used entry");

        Some((entry.key, entry.value))
    }
}

impl<K, V> CacheStore<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };
        self.stats.record_hit();
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            return None;
        }

        if self.capacity == 0 {
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        evicted
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(policy = "lru", dropped = self.index.len(), "cleared");

        self.list.clear();
        self.index.clear();
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn policy_name(&self) -> &'static str {
        "lru"
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
