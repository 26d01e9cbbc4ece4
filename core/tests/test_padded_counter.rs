//! Tests for the cache-line padded atomic counter

use std::mem::{align_of, size_of};
use std::sync::atomic::AtomicI64;
use std::thread;

use fastpar_core::{PaddedCounter, CACHE_LINE_SIZE};

#[test]
fn test_layout_fills_one_cache_line() {
    assert_eq!(size_of::<PaddedCounter>(), CACHE_LINE_SIZE);
    assert_eq!(align_of::<PaddedCounter>(), CACHE_LINE_SIZE);
    assert!(size_of::<PaddedCounter>() >= size_of::<AtomicI64>());
}

#[test]
fn test_adjacent_counters_on_distinct_lines() {
    let counters: Vec<PaddedCounter> = (0..8).map(|_| PaddedCounter::default()).collect();

    for pair in counters.windows(2) {
        let a = &pair[0] as *const PaddedCounter as usize;
        let b = &pair[1] as *const PaddedCounter as usize;
        assert_eq!(a % CACHE_LINE_SIZE, 0, "counter not line aligned");
        assert_eq!(b - a, CACHE_LINE_SIZE);
        assert_ne!(a / CACHE_LINE_SIZE, b / CACHE_LINE_SIZE);
    }
}

#[test]
fn test_add_get_set() {
    let counter = PaddedCounter::new(0);
    assert_eq!(counter.add(5), 5);
    assert_eq!(counter.add(-2), 3);
    assert_eq!(counter.get(), 3);

    counter.set(-100);
    assert_eq!(counter.get(), -100);
}

#[test]
fn test_adjacent_counters_do_not_cross_contaminate() {
    const ADDS: i64 = 2_000_000;
    let counters = [PaddedCounter::new(0), PaddedCounter::new(0)];

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ADDS {
                counters[0].add(1);
            }
        });
        s.spawn(|| {
            for _ in 0..ADDS {
                counters[1].add(3);
            }
        });
    });

    assert_eq!(counters[0].get(), ADDS);
    assert_eq!(counters[1].get(), ADDS * 3);
}

#[test]
fn test_shared_counter_sums_all_threads() {
    let counter = PaddedCounter::new(0);

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..100_000 {
                    counter.add(1);
                }
            });
        }
    });

    assert_eq!(counter.get(), 800_000);
}

#[test]
fn test_serializes_like_plain_integer() {
    for value in [0i64, 1, -1, 42, i64::MAX, i64::MIN] {
        let counter = PaddedCounter::new(value);
        let json = serde_json::to_string(&counter).unwrap();
        assert_eq!(json, serde_json::to_string(&value).unwrap());

        let restored: PaddedCounter = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get(), value);
    }
}

#[test]
fn test_serializes_inside_struct() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Stats {
        hits: PaddedCounter,
        misses: i64,
    }

    let stats = Stats {
        hits: PaddedCounter::new(7),
        misses: 7,
    };
    let json = serde_json::to_string(&stats).unwrap();
    assert_eq!(json, r#"{"hits":7,"misses":7}"#);

    let restored: Stats = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.hits.get(), restored.misses);
}

#[test]
fn test_rejects_non_integer_json() {
    assert!(serde_json::from_str::<PaddedCounter>("\"7\"").is_err());
    assert!(serde_json::from_str::<PaddedCounter>("1.5").is_err());
}

#[test]
fn test_clone_is_a_snapshot() {
    let counter = PaddedCounter::new(1);
    let snapshot = counter.clone();
    counter.add(1);
    assert_eq!(snapshot.get(), 1);
    assert_eq!(counter.get(), 2);
}

#[test]
fn test_sum_of_slice() {
    let counters: Vec<PaddedCounter> = (1..=4i64).map(PaddedCounter::from).collect();
    assert_eq!(PaddedCounter::sum(&counters), 10);
    assert_eq!(counters[3].clone().into_inner(), 4);
}
