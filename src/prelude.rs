pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::metrics::{CacheStats, MetricsExporter, PrometheusTextExporter, StatsSnapshot};
pub use crate::policy::hybrid::{DEFAULT_ALPHA, DEFAULT_BETA, HybridCache};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::CacheStore;
