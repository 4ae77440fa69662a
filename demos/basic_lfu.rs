use evictkit::policy::lfu::LfuCache;
use evictkit::traits::CacheStore;

fn main() {
    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    cache.put("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("frequency of a: {:?}", cache.frequency(&"a"));
}

// Expected output:
// contains a? true
// contains b? false
// frequency of a: Some(2)
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is evicted.
