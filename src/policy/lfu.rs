//! # LFU (Least Frequently Used) Store
//!
//! Evicts the entry with the lowest access count. Among entries sharing that
//! count, the one touched longest ago goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                             │
//!   │                                                                     │
//!   │   index: FxHashMap<K, SlotId>        entries: FrequencyBuckets      │
//!   │   ┌────────┬───────┐                                                │
//!   │   │ page_1 │ id_0  │──────────►  freq 3: [page_1]                   │
//!   │   │ page_4 │ id_3  │──────────►  freq 2: [page_4]                   │
//!   │   │ page_2 │ id_1  │──┐                                             │
//!   │   │ page_5 │ id_4  │──┴───────►  freq 1: [page_5] ◄─► [page_2]      │
//!   │   └────────┴───────┘                                    ▲           │
//!   │                                          min_freq = 1   │ victim    │
//!   └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Effect                                                   |
//! |------------------|----------------------------------------------------------|
//! | `get` hit        | hit +1, frequency +1, front of the next bucket           |
//! | `get` miss       | miss +1                                                  |
//! | `put` existing   | value replaced, then counted and bumped like a `get` hit |
//! | `put` new, full  | back of `min_freq` bucket evicted, new entry at freq 1   |
//! | `put`, cap 0     | no-op                                                    |
//!
//! All operations are O(1). The minimum frequency is advanced lazily when
//! its bucket empties, never found by scanning.
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::CacheStore;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, "A");
//! cache.put(2, "B");
//! cache.get(&1);
//! assert_eq!(cache.frequency(&1), Some(2));
//!
//! // key 2 has the lowest frequency
//! assert_eq!(cache.put(3, "C"), Some((2, "B")));
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.min_frequency(), Some(1));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
use crate::metrics::CacheStats;
use crate::traits::CacheStore;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity store with least-frequently-used eviction.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    entries: FrequencyBuckets<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FrequencyBuckets::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Access count of `key`, starting at 1 on insert.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.frequency(id)
    }

    /// Lowest frequency among resident entries, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        self.entries.min_freq()
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// The entry the next eviction would remove.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.entries
            .peek_min()
            .map(|(_, entry, _)| (&entry.key, &entry.value))
    }

    /// Entries by ascending frequency; most recently touched first within a
    /// frequency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries
            .iter()
            .map(|(_, entry, _)| (&entry.key, &entry.value))
    }

    /// Verifies capacity, bucket membership, the minimum frequency and
    /// index agreement.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lfu holds {} entries over capacity {}",
                self.len(),
                self.capacity
            )));
        }
        self.entries.validate()?;
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "lfu index has {} keys, buckets hold {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }
        for (id, entry, _) in self.entries.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "lfu entry {:?} is not indexed by its key",
                    id
                )));
            }
        }
        Ok(())
    }

    fn insert_new(&mut self, key: K, value: V) -> Option<(K, V)> {
        let entry = Entry {
            key: key.clone(),
            value,
        };

        if self.index.len() < self.capacity {
            let id = self.entries.insert(entry);
            self.index.insert(key, id);
            return None;
        }

        let (evicted, id) = self.entries.replace_min(entry);
        self.index.insert(key, id);
        let (victim, _freq) = evicted?;
        self.index.remove(&victim.key);
        self.stats.record_eviction();

        #[cfg(feature = "tracing")]
        tracing::debug!(policy = "lfu", frequency = _freq, "evicted least frequently used entry");

        Some((victim.key, victim.value))
    }
}

impl<K, V> CacheStore<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };
        self.stats.record_hit();
        self.entries.touch(id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.stats.record_hit();
            self.entries.touch(id);
            return None;
        }

        if self.capacity == 0 {
            return None;
        }
        self.insert_new(key, value)
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
        tracing::trace!(policy = "lfu", dropped = self.index.len(), "cleared");

        self.entries.clear();
        self.index.clear();
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn policy_name(&self) -> &'static str {
        "lfu"
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
