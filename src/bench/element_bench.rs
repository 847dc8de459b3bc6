use std::{
    collections::BTreeSet,
    hint::black_box,
    time::{Duration, Instant},
};

use crate::{
    bench::BenchRecord,
    sets::{
        baseline::{DenseSet, ElementSet, IntegerSet},
        fixed::FixedSet,
    },
};

/// Times filling, probing and emptying one `S` over `[0, capacity)`, `rounds`
/// times, and reports the average cost per element operation.
pub fn bench_element_set<S: ElementSet>(capacity: usize, rounds: usize) -> Vec<BenchRecord> {
    let mut insert_time = Duration::ZERO;
    let mut contains_time = Duration::ZERO;
    let mut remove_time = Duration::ZERO;

    for _ in 0..rounds {
        let mut set = black_box(S::with_capacity(capacity));

        let start = Instant::now();
        for element in 0..capacity {
            black_box(set.insert(element));
        }
        insert_time += start.elapsed();

        let start = Instant::now();
        for element in 0..capacity {
            black_box(set.contains(element));
        }
        contains_time += start.elapsed();

        let start = Instant::now();
        for element in 0..capacity {
            black_box(set.remove(element));
        }
        remove_time += start.elapsed();

        debug_assert!(set.is_empty());
    }

    let ops = capacity * rounds;
    vec![
        BenchRecord::from_total(S::NAME, capacity, "insert", insert_time, ops),
        BenchRecord::from_total(S::NAME, capacity, "contains", contains_time, ops),
        BenchRecord::from_total(S::NAME, capacity, "remove", remove_time, ops),
    ]
}

/// Runs [`bench_element_set`] for the fixed set and every baseline.
pub fn run_element_benchmarks(capacity: usize, rounds: usize) -> Vec<BenchRecord> {
    let mut records = bench_element_set::<FixedSet>(capacity, rounds);
    records.extend(bench_element_set::<BTreeSet<usize>>(capacity, rounds));
    records.extend(bench_element_set::<IntegerSet>(capacity, rounds));
    records.extend(bench_element_set::<DenseSet>(capacity, rounds));
    records
}
