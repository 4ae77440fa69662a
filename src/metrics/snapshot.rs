use crate::metrics::stats::CacheStats;

/// Point-in-time view of a store: counters plus occupancy gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    /// Short policy label, e.g. `"lru"`.
    pub policy: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl StatsSnapshot {
    pub fn new(policy: &'static str, stats: CacheStats, len: usize, capacity: usize) -> Self {
        Self {
            policy,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            len,
            capacity,
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }
}
