/// Hit, miss and eviction counters kept by every store.
///
/// Counters only ever grow; `clear()` on a store leaves them untouched.
///
/// ```
/// use evictkit::metrics::CacheStats;
///
/// let stats = CacheStats::default();
/// assert_eq!(stats.hit_ratio(), 0.0);
///
/// let stats = CacheStats { hits: 3, misses: 1, evictions: 0 };
/// assert_eq!(stats.hit_ratio(), 0.75);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// `hits + misses`.
    #[inline]
    pub fn lookups(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    /// `hits / (hits + misses)`, or `0.0` before the first lookup.
    #[inline]
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions = self.evictions.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_have_zero_ratio() {
        let stats = CacheStats::default();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn ratio_tracks_counts() {
        let mut stats = CacheStats::default();
        stats.record_miss();
        assert_eq!(stats.hit_ratio(), 0.0);
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_ratio(), 0.75);
    }

    #[test]
    fn evictions_do_not_affect_ratio() {
        let mut stats = CacheStats::default();
        stats.record_hit();
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.hit_ratio(), 1.0);
    }

    #[test]
    fn counters_saturate() {
        let mut stats = CacheStats {
            hits: u64::MAX,
            misses: 0,
            evictions: u64::MAX,
        };
        stats.record_hit();
        stats.record_eviction();
        assert_eq!(stats.hits, u64::MAX);
        assert_eq!(stats.evictions, u64::MAX);
    }
}
