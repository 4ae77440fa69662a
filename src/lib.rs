//! evictkit: fixed-capacity cache stores with LRU, LFU and hybrid
//! frequency/recency eviction.
//!
//! Every store implements [`CacheStore`](traits::CacheStore). Pick a
//! concrete store from [`policy`] or choose one at runtime with
//! [`CacheBuilder`](builder::CacheBuilder).
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 0, evictions: 1 });
//! ```
//!
//! Enable the `tracing` feature to log evictions at `debug` level.

pub mod builder;
pub mod clock;
pub mod ds;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, SlotArena, SlotId};
pub use crate::policy::hybrid::HybridCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
