use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use tqdm::tqdm;
use tracing::info;

use crate::{
    bench::BenchRecord,
    error::SetError,
    fs::{Workload, WorkloadError, WorkloadParams},
    search::SubsetIndex,
    sets::fixed::FixedSet,
    statistics::Stats,
};

const INDEX_NAME: &str = "subset_index";

/// Builds, queries and tears down a [`SubsetIndex`] over a generated workload,
/// `rounds` times. Returns per-operation timings plus the query statistics of
/// every round merged together.
pub fn run_index_benchmark(
    params: &WorkloadParams,
    rounds: usize,
) -> Result<(Vec<BenchRecord>, Stats), WorkloadError> {
    let workload = Workload::generate(params)?;
    let entries = workload
        .entries
        .iter()
        .map(|entry| entry.to_set(workload.capacity).map(|set| (entry.value, set)))
        .collect::<Result<Vec<(u32, FixedSet)>, SetError>>()?;
    let queries = workload.query_sets()?;

    info!(
        capacity = params.capacity,
        entries = entries.len(),
        queries = queries.len(),
        rounds,
        "benchmarking subset index"
    );

    let mut insert_time = Duration::ZERO;
    let mut query_time = Duration::ZERO;
    let mut remove_time = Duration::ZERO;
    let mut combined_stats = Stats::new();

    for _ in tqdm(0..rounds).desc(Some("index rounds")) {
        let mut index = SubsetIndex::new(workload.capacity);
        let mut local_stats = Stats::new();

        let start = Instant::now();
        for (value, set) in &entries {
            index.insert(*value, set)?;
        }
        insert_time += start.elapsed();

        let start = Instant::now();
        for query in &queries {
            black_box(index.find_subsets_with_stats(query, &mut local_stats)?);
        }
        query_time += start.elapsed();

        let start = Instant::now();
        for (value, set) in &entries {
            black_box(index.remove(value, set)?);
        }
        remove_time += start.elapsed();

        debug_assert_eq!(index.node_count(), 1);
        combined_stats = combined_stats.merge(&local_stats);
    }

    let capacity = params.capacity;
    let records = vec![
        BenchRecord::from_total(INDEX_NAME, capacity, "insert", insert_time, entries.len() * rounds),
        BenchRecord::from_total(INDEX_NAME, capacity, "find_subsets", query_time, queries.len() * rounds),
        BenchRecord::from_total(INDEX_NAME, capacity, "remove", remove_time, entries.len() * rounds),
    ];

    Ok((records, combined_stats))
}
