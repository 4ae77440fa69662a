// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across all cache
// policies. These span multiple modules and belong here rather than in any
// single source file.

use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::clock::ManualClock;
use evictkit::traits::CacheStore;

fn policies() -> [CachePolicy; 3] {
    [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::hybrid()]
}

fn build(capacity: usize, policy: CachePolicy) -> (Cache<u32, u32>, ManualClock) {
    let clock = ManualClock::new();
    let cache = CacheBuilder::new(capacity)
        .clock(clock.clone())
        .build(policy);
    (cache, clock)
}

// ==============================================
// Capacity Accounting
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn distinct_inserts_evict_exactly_the_overflow() {
        for policy in policies() {
            for (n, c) in [(10u32, 3usize), (5, 1), (64, 16), (4, 4)] {
                let (mut cache, clock) = build(c, policy);
                for k in 0..n {
                    cache.put(k, k);
                    clock.advance(1);
                }
                assert_eq!(
                    cache.evictions(),
                    u64::from(n) - c as u64,
                    "{:?}: n={} c={}",
                    policy,
                    n,
                    c
                );
                assert_eq!(cache.len(), c);
                cache.check_invariants().unwrap();
            }
        }
    }

    #[test]
    fn capacity_zero_is_inert() {
        for policy in policies() {
            let (mut cache, _clock) = build(0, policy);
            assert_eq!(cache.capacity(), 0);
            assert_eq!(cache.put(1, 1), None);
            assert_eq!(cache.len(), 0, "{:?} accepted an entry", policy);
            assert_eq!(cache.evictions(), 0);
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.misses(), 1);
        }
    }

    #[test]
    fn update_at_capacity_never_evicts() {
        for policy in policies() {
            let (mut cache, clock) = build(3, policy);
            for k in 0..3 {
                cache.put(k, k);
            }
            for round in 0..10 {
                clock.advance(1);
                assert_eq!(cache.put(round % 3, round), None);
            }
            assert_eq!(cache.evictions(), 0, "{:?}", policy);
            assert_eq!(cache.len(), 3);
        }
    }
}

// ==============================================
// Counters
// ==============================================

mod counters {
    use super::*;

    #[test]
    fn hit_ratio_is_zero_before_any_lookup() {
        for policy in policies() {
            let (mut cache, _clock) = build(4, policy);
            assert_eq!(cache.hit_ratio(), 0.0);
            cache.put(1, 1);
            assert_eq!(cache.hit_ratio(), 0.0);
        }
    }

    #[test]
    fn hit_ratio_is_hits_over_lookups() {
        for policy in policies() {
            let (mut cache, _clock) = build(4, policy);
            cache.put(1, 1);
            cache.get(&1);
            cache.get(&1);
            cache.get(&1);
            cache.get(&2);
            assert_eq!(cache.hits(), 3);
            assert_eq!(cache.misses(), 1);
            assert_eq!(cache.hit_ratio(), 0.75);
        }
    }

    #[test]
    fn update_counts_a_hit_only_for_lfu() {
        for policy in policies() {
            let (mut cache, clock) = build(2, policy);
            cache.put(1, 10);
            clock.advance(1);
            assert_eq!(cache.put(1, 11), None);

            let expected = if policy == CachePolicy::Lfu { 1 } else { 0 };
            assert_eq!(cache.hits(), expected, "{:?}", policy);
            assert_eq!(cache.misses(), 0);
            assert_eq!(cache.peek(&1), Some(&11));
        }
    }

    #[test]
    fn snapshot_carries_policy_label() {
        for policy in policies() {
            let (mut cache, _clock) = build(2, policy);
            cache.put(1, 1);
            let snap = cache.snapshot();
            assert_eq!(snap.policy, cache.policy_name());
            assert_eq!((snap.len, snap.capacity), (1, 2));
        }
    }
}

// ==============================================
// Clear and Contains
// ==============================================

mod state {
    use super::*;

    #[test]
    fn clear_forgets_every_resident_key() {
        for policy in policies() {
            let (mut cache, _clock) = build(4, policy);
            for k in 0..6 {
                cache.put(k, k);
            }
            let resident: Vec<u32> = (0..6).filter(|k| cache.contains(k)).collect();
            assert_eq!(resident.len(), 4);
            let stats = cache.stats();

            cache.clear();
            assert_eq!(cache.len(), 0);
            for k in resident {
                assert!(!cache.contains(&k), "{:?} kept {}", policy, k);
            }
            assert_eq!(cache.stats(), stats);
        }
    }

    #[test]
    fn contains_is_idempotent() {
        for policy in policies() {
            let (mut cache, clock) = build(2, policy);
            cache.put(1, 1);
            clock.advance(1);
            cache.put(2, 2);
            clock.advance(1);

            for _ in 0..20 {
                assert!(cache.contains(&1));
                assert!(!cache.contains(&3));
            }
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.hits() + cache.misses(), 0);

            // every policy still picks the older, untouched key
            assert_eq!(cache.put(3, 3), Some((1, 1)), "{:?}", policy);
        }
    }
}

// ==============================================
// Reference Scenarios
// ==============================================

mod scenarios {
    use super::*;
    use evictkit::policy::lfu::LfuCache;
    use evictkit::policy::lru::LruCache;

    #[test]
    fn lru_evicts_untouched_key() {
        let mut cache = LruCache::new(2);
        cache.put(1, "A");
        cache.put(2, "B");
        assert_eq!(cache.get(&1), Some(&"A"));
        cache.put(3, "C");
        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
    }

    #[test]
    fn lfu_evicts_minimum_frequency() {
        let mut cache = LfuCache::new(2);
        cache.put(1, "A");
        cache.put(2, "B");
        cache.get(&1);
        assert_eq!(cache.frequency(&1), Some(2));
        cache.put(3, "C");
        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
    }
}

// ==============================================
// Random Operation Sequences
// ==============================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u32),
        Get(u32),
        Contains(u32),
        Tick,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u32..32).prop_map(Op::Put),
            4 => (0u32..32).prop_map(Op::Get),
            1 => (0u32..32).prop_map(Op::Contains),
            1 => Just(Op::Tick),
        ]
    }

    fn policy_strategy() -> impl Strategy<Value = CachePolicy> {
        prop_oneof![
            Just(CachePolicy::Lru),
            Just(CachePolicy::Lfu),
            (0.0f64..2.0, 0.0f64..2.0).prop_map(|(alpha, beta)| CachePolicy::Hybrid { alpha, beta }),
        ]
    }

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_counters_match_operation_log(
            policy in policy_strategy(),
            capacity in 0usize..12,
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let (mut cache, clock) = build(capacity, policy);
            let mut gets = 0u64;
            let mut hits = 0u64;
            let mut overflow_puts = 0u64;
            let mut update_hits = 0u64;
            // lfu counts an update of a resident key as a hit
            let counts_updates = policy == CachePolicy::Lfu;

            for op in ops {
                match op {
                    Op::Put(k) => {
                        let is_new = !cache.contains(&k);
                        if is_new && capacity > 0 && cache.len() == capacity {
                            overflow_puts += 1;
                        }
                        if !is_new && counts_updates {
                            hits += 1;
                            update_hits += 1;
                        }
                        cache.put(k, k);
                    },
                    Op::Get(k) => {
                        gets += 1;
                        if cache.contains(&k) {
                            hits += 1;
                        }
                        let got = cache.get(&k).copied();
                        prop_assert!(got.is_none() || got == Some(k));
                    },
                    Op::Contains(k) => {
                        let len = cache.len();
                        let stats = cache.stats();
                        cache.contains(&k);
                        prop_assert_eq!(cache.len(), len);
                        prop_assert_eq!(cache.stats(), stats);
                    },
                    Op::Tick => clock.advance(1),
                }

                prop_assert!(cache.len() <= capacity);
                prop_assert_eq!(cache.hits(), hits);
                prop_assert_eq!(cache.hits() + cache.misses(), gets + update_hits);
                prop_assert_eq!(cache.evictions(), overflow_puts);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }
    }
}
