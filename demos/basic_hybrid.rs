use std::thread;
use std::time::Duration;

use evictkit::policy::hybrid::HybridCache;
use evictkit::traits::CacheStore;

fn main() {
    // frequency counts twice as much as recency
    let mut cache: HybridCache<&str, u32> = HybridCache::new(2, 1.0, 0.5);

    cache.put("hot", 1);
    for _ in 0..5 {
        cache.get(&"hot");
    }
    cache.put("cold", 2);
    thread::sleep(Duration::from_millis(5));

    for key in ["hot", "cold"] {
        println!("{} score {:.3}", key, cache.score(&key).unwrap_or_default());
    }

    let evicted = cache.put("new", 3);
    println!("evicted {:?}", evicted.map(|(key, _)| key));
}

// Expected output (scores vary with timing):
// hot score 5.1xx
// cold score 0.1xx
// evicted Some("cold")
//
// Explanation: both entries are at least 5 ms old, so the recency terms are
// small and "hot" keeps its lead from five hits.
