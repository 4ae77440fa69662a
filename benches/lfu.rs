use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use evictkit::policy::lfu::LfuCache;
use evictkit::traits::CacheStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn filled(capacity: u64) -> LfuCache<u64, u64> {
    let mut cache = LfuCache::new(capacity as usize);
    for i in 0..capacity {
        cache.put(i, i);
    }
    cache
}

fn bench_lfu_put_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_policy");
    group.throughput(Throughput::Elements(1024 * 2));
    group.bench_function("put_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_get_hotset(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_policy");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("get_hotset", |b| {
        b.iter_batched(
            || filled(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

// Skewed keys keep many distinct frequencies populated, so eviction has to
// walk the lazy minimum across buckets.
fn bench_lfu_skewed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_workload");
    group.throughput(Throughput::Elements(8192));
    group.bench_function("skewed", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                let keys: Vec<u64> = (0..8192)
                    .map(|_| {
                        let hot = rng.random_bool(0.8);
                        if hot { rng.random_range(0..256) } else { rng.random_range(0..65_536) }
                    })
                    .collect();
                (LfuCache::new(1024), keys)
            },
            |(mut cache, keys)| {
                for key in keys {
                    if cache.get(&key).is_none() {
                        cache.put(key, key);
                    }
                }
                std::hint::black_box(cache.hit_ratio())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_lfu_put_get,
    bench_lfu_get_hotset,
    bench_lfu_skewed_workload
);
criterion_main!(benches);
