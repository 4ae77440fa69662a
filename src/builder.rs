//! Unified cache builder for all eviction policies.
//!
//! Picks a policy at runtime and hands back a [`Cache`] that drives it
//! through [`CacheStore`], so calling code never names a concrete store.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CacheStore;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.policy_name(), "lru");
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{ConfigError, InvariantError};
use crate::metrics::CacheStats;
use crate::policy::hybrid::{DEFAULT_ALPHA, DEFAULT_BETA, HybridCache};
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::CacheStore;

/// Clock handle shared by builder-made hybrid stores.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction (bucket-based).
    Lfu,
    /// Lowest `alpha * frequency + beta * recency` score.
    Hybrid { alpha: f64, beta: f64 },
}

impl CachePolicy {
    /// Hybrid policy with the default weights.
    pub fn hybrid() -> Self {
        CachePolicy::Hybrid {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Hybrid(HybridCache<K, V, SharedClock>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.peek(key),
            CacheInner::Lfu(lfu) => lfu.peek(key),
            CacheInner::Hybrid(hybrid) => hybrid.peek(key),
        }
    }

    /// Entries in the underlying store's natural order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        match &self.inner {
            CacheInner::Lru(lru) => Box::new(lru.iter()),
            CacheInner::Lfu(lfu) => Box::new(lfu.iter()),
            CacheInner::Hybrid(hybrid) => Box::new(hybrid.iter()),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Lfu(lfu) => lfu.check_invariants(),
            CacheInner::Hybrid(hybrid) => hybrid.check_invariants(),
        }
    }
}

impl<K, V> CacheStore<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::Hybrid(hybrid) => hybrid.get(key),
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::Lfu(lfu) => lfu.put(key, value),
            CacheInner::Hybrid(hybrid) => hybrid.put(key, value),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::Hybrid(hybrid) => hybrid.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Hybrid(hybrid) => hybrid.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Hybrid(hybrid) => hybrid.capacity(),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Hybrid(hybrid) => hybrid.clear(),
        }
    }

    fn stats(&self) -> CacheStats {
        match &self.inner {
            CacheInner::Lru(lru) => lru.stats(),
            CacheInner::Lfu(lfu) => lfu.stats(),
            CacheInner::Hybrid(hybrid) => hybrid.stats(),
        }
    }

    fn policy_name(&self) -> &'static str {
        match &self.inner {
            CacheInner::Lru(lru) => lru.policy_name(),
            CacheInner::Lfu(lfu) => lfu.policy_name(),
            CacheInner::Hybrid(hybrid) => hybrid.policy_name(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy_name())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
    clock: Option<SharedClock>,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clock: None,
        }
    }

    /// Time source for hybrid stores. Defaults to a fresh
    /// [`MonotonicClock`] per build.
    pub fn clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if a hybrid weight is negative, NaN or infinite. Use
    /// [`try_build`](Self::try_build) to get the error instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// let hybrid = CacheBuilder::new(100)
    ///     .build::<u64, String>(CachePolicy::Hybrid { alpha: 0.7, beta: 0.3 });
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::Hybrid { alpha, beta } => {
                let clock = self
                    .clock
                    .unwrap_or_else(|| Arc::new(MonotonicClock::new()) as SharedClock);
                CacheInner::Hybrid(HybridCache::try_with_clock(
                    self.capacity,
                    alpha,
                    beta,
                    clock,
                )?)
            },
        };

        Ok(Cache { inner })
    }
}
