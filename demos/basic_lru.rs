use evictkit::policy::lru::LruCache;
use evictkit::traits::CacheStore;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    if let Some((key, value)) = cache.put(3, "gamma".to_string()) {
        println!("evicted {}: {}", key, value);
    }

    println!("contains 2? {}", cache.contains(&2));
}

// Expected output:
// hit 1: alpha
// evicted 2: beta
// contains 2? false
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2, so contains(2) is false.
