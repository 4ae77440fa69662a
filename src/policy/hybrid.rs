//! # Hybrid (Frequency + Recency) Store
//!
//! Scores every entry by how often and how recently it was accessed and
//! evicts the lowest score:
//!
//! ```text
//!   score = alpha * frequency + beta * recency
//!
//!   recency = 1 / (now - last_access)      elapsed > 0
//!           = f64::MAX                     elapsed == 0
//! ```
//!
//! Elapsed time is measured in milliseconds of the store's [`Clock`]. An
//! entry accessed within the current millisecond gets the largest recency
//! value and is effectively protected for that round.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                     HybridCache<K, V, C: Clock>                     │
//!   │                                                                     │
//!   │   index: FxHashMap<K, SlotId>                                       │
//!   │                                                                     │
//!   │   entries: IntrusiveList<Entry>  (insertion order = scan order)     │
//!   │     head ─► [k1 f=3 t=10] ◄─► [k2 f=0 t=12] ◄─► [k3 f=1 t=40] ◄─ tail│
//!   │              oldest insert                       newest insert      │
//!   │                                                                     │
//!   │   alpha, beta: f64        clock: C (read only)                      │
//!   └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hits and updates only rewrite `frequency` and `last_access` in place, so
//! they are O(1). Eviction walks the list from head to tail, O(n). The
//! first scanned entry seeds the candidate and only a strictly lower score
//! replaces it, so ties go to the entry inserted earliest and a full store
//! always gives up exactly one entry.
//!
//! New entries start at frequency 0.
//!
//! ## Example
//!
//! ```
//! use evictkit::clock::ManualClock;
//! use evictkit::policy::hybrid::HybridCache;
//! use evictkit::traits::CacheStore;
//!
//! let clock = ManualClock::new();
//! let mut cache = HybridCache::with_clock(2, 0.5, 0.5, clock.clone());
//!
//! cache.put(1, "A");
//! clock.advance(10);
//! cache.put(2, "B");
//! clock.advance(10);
//!
//! // key 1: 0.5 * 0 + 0.5 / 20, key 2: 0.5 * 0 + 0.5 / 10
//! assert_eq!(cache.put(3, "C"), Some((1, "A")));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::clock::{Clock, MonotonicClock};
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
use crate::metrics::CacheStats;
use crate::traits::CacheStore;

/// Frequency weight used by the reference workload.
pub const DEFAULT_ALPHA: f64 = 0.5;
/// Recency weight used by the reference workload.
pub const DEFAULT_BETA: f64 = 0.5;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    frequency: u64,
    last_access: u64,
}

/// Fixed-capacity store evicting the lowest frequency/recency score.
#[derive(Debug)]
pub struct HybridCache<K, V, C = MonotonicClock> {
    entries: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    alpha: f64,
    beta: f64,
    clock: C,
    stats: CacheStats,
}

impl<K, V> HybridCache<K, V, MonotonicClock>
where
    K: Eq + Hash + Clone,
{
    /// Creates a store timed by a fresh [`MonotonicClock`].
    ///
    /// # Panics
    ///
    /// Panics if either weight is negative, NaN or infinite.
    pub fn new(capacity: usize, alpha: f64, beta: f64) -> Self {
        match Self::try_new(capacity, alpha, beta) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a store timed by a fresh [`MonotonicClock`], returning an
    /// error on invalid weights.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `alpha` or `beta` is negative, NaN or
    /// infinite.
    pub fn try_new(capacity: usize, alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        Self::try_with_clock(capacity, alpha, beta, MonotonicClock::new())
    }
}

impl<K, V, C> HybridCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// # Panics
    ///
    /// Panics if either weight is negative, NaN or infinite.
    pub fn with_clock(capacity: usize, alpha: f64, beta: f64, clock: C) -> Self {
        match Self::try_with_clock(capacity, alpha, beta, clock) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a store timed by `clock`, returning an error on invalid
    /// weights.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `alpha` or `beta` is negative, NaN or
    /// infinite.
    ///
    /// ```
    /// use evictkit::clock::ManualClock;
    /// use evictkit::policy::hybrid::HybridCache;
    ///
    /// let ok = HybridCache::<u32, u32, _>::try_with_clock(8, 0.7, 0.3, ManualClock::new());
    /// assert!(ok.is_ok());
    ///
    /// let bad = HybridCache::<u32, u32, _>::try_with_clock(8, 0.7, f64::NAN, ManualClock::new());
    /// assert!(bad.is_err());
    /// ```
    pub fn try_with_clock(
        capacity: usize,
        alpha: f64,
        beta: f64,
        clock: C,
    ) -> Result<Self, ConfigError> {
        ConfigError::check_weight("alpha", alpha)?;
        ConfigError::check_weight("beta", beta)?;
        Ok(Self {
            entries: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            alpha,
            beta,
            clock,
            stats: CacheStats::default(),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of hits and updates since insertion.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entry(key).map(|entry| entry.frequency)
    }

    /// Clock reading at the last insert, hit or update.
    pub fn last_access(&self, key: &K) -> Option<u64> {
        self.entry(key).map(|entry| entry.last_access)
    }

    /// Score of `key` at the clock's current reading.
    pub fn score(&self, key: &K) -> Option<f64> {
        let now = self.clock.now_millis();
        self.entry(key).map(|entry| self.score_at(entry, now))
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// The entry an eviction at the current clock reading would remove.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        let (id, _) = self.select_victim(self.clock.now_millis())?;
        self.entries.get(id).map(|entry| (&entry.key, &entry.value))
    }

    /// Entries in insertion order, which is also the eviction scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries
            .iter()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// Verifies capacity, index/list agreement and that no timestamp lies
    /// ahead of the clock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "hybrid holds {} entries over capacity {}",
                self.len(),
                self.capacity
            )));
        }
        self.entries.validate()?;
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "hybrid index has {} keys, list has {} nodes",
                self.index.len(),
                self.entries.len()
            )));
        }
        let now = self.clock.now_millis();
        for (id, entry) in self.entries.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "hybrid node {:?} is not indexed by its key",
                    id
                )));
            }
            if entry.last_access > now {
                return Err(InvariantError::new(format!(
                    "hybrid node {:?} accessed at {} after clock reading {}",
                    id, entry.last_access, now
                )));
            }
        }
        Ok(())
    }

    fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let id = *self.index.get(key)?;
        self.entries.get(id)
    }

    fn score_at(&self, entry: &Entry<K, V>, now: u64) -> f64 {
        let elapsed = now.saturating_sub(entry.last_access);
        let recency = if elapsed == 0 {
            f64::MAX
        } else {
            1.0 / elapsed as f64
        };
        self.alpha * entry.frequency as f64 + self.beta * recency
    }

    fn select_victim(&self, now: u64) -> Option<(SlotId, f64)> {
        let mut candidate: Option<(SlotId, f64)> = None;
        for (id, entry) in self.entries.iter() {
            let score = self.score_at(entry, now);
            match candidate {
                Some((_, best)) if score >= best => {},
                _ => candidate = Some((id, score)),
            }
        }
        candidate
    }

    fn evict(&mut self, now: u64) -> Option<(K, V)> {
        let (id, _score) = self.select_victim(now)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            policy = "hybrid",
            frequency = entry.frequency,
            score = _score,
            "evicted lowest scoring entry"
        );

        Some((entry.key, entry.value))
    }

    fn refresh(&mut self, id: SlotId) {
        let now = self.clock.now_millis();
        if let Some(entry) = self.entries.get_mut(id) {
            entry.frequency = entry.frequency.saturating_add(1);
            entry.last_access = now;
        }
    }
}

impl<K, V, C> CacheStore<K, V> for HybridCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };
        self.stats.record_hit();
        self.refresh(id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.refresh(id);
            return None;
        }

        if self.capacity == 0 {
            return None;
        }

        let now = self.clock.now_millis();
        let evicted = if self.index.len() >= self.capacity {
            self.evict(now)
        } else {
            None
        };

        let id = self.entries.push_back(Entry {
            key: key.clone(),
            value,
            frequency: 0,
            last_access: now,
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
        tracing::trace!(policy = "hybrid", dropped = self.index.len(), "cleared");

        self.entries.clear();
        self.index.clear();
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn policy_name(&self) -> &'static str {
        "hybrid"
    }
}

impl<K, V, C> Extend<(K, V)> for HybridCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
