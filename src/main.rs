use binset::{
    bench::{BenchRecord, run_element_benchmarks, run_index_benchmark},
    fs::{Workload, WorkloadError, WorkloadParams},
    statistics::Stats,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};
use tqdm::tqdm;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Fixed-universe bitsets and subset search
#[derive(Parser, Debug)]
#[command(name = "binset")]
#[command(about = "Fixed-universe bitsets and a subset-search index", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an index from a workload file and run its subset queries
    Search {
        /// Path to the workload file (JSON)
        #[arg(short, long)]
        workload: PathBuf,

        /// Print results as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a random workload file
    Generate {
        /// Size of the element universe
        #[arg(short, long)]
        capacity: usize,

        /// Number of (value, set) entries to index
        #[arg(long, default_value_t = 1_000)]
        entries: usize,

        /// Number of indexed entries to remove again
        #[arg(long, default_value_t = 0)]
        removals: usize,

        /// Number of subset queries
        #[arg(long, default_value_t = 100)]
        queries: usize,

        /// Probability of each element being in an indexed set
        #[arg(long, default_value_t = 0.1)]
        entry_density: f64,

        /// Probability of each element being in a query
        #[arg(long, default_value_t = 0.5)]
        query_density: f64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Where to write the workload
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compare the fixed set against other set representations and time the index
    Bench {
        /// Capacities to sweep (comma-separated list, e.g., "8,64,1000")
        #[arg(short, long, value_delimiter = ',', default_value = "8,64,1024")]
        capacity: Vec<usize>,

        /// Repetitions per measurement
        #[arg(short, long, default_value_t = 10)]
        rounds: usize,

        /// Entries indexed per round of the index benchmark
        #[arg(long, default_value_t = 1_000)]
        entries: usize,

        /// Queries per round of the index benchmark
        #[arg(long, default_value_t = 100)]
        queries: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct QueryReport {
    query: Vec<usize>,
    matches: Vec<u32>,
}

#[derive(Serialize)]
struct SearchReport {
    results: Vec<QueryReport>,
    stats: Stats,
}

fn run_search(path: PathBuf, json: bool) -> Result<(), WorkloadError> {
    let workload = Workload::load(&path)?;
    let index = workload.build_index()?;
    let queries = workload.query_sets()?;
    info!(
        capacity = index.capacity(),
        stored = index.len(),
        nodes = index.node_count(),
        "index built"
    );

    let mut stats = Stats::new();
    let mut results = Vec::with_capacity(queries.len());
    for (elements, query) in workload.queries.iter().zip(&queries) {
        let mut matches = index.find_subsets_with_stats(query, &mut stats)?;
        // the index makes no ordering promise
        matches.sort_unstable();

        if !json {
            println!("{query} -> {matches:?}");
        }
        results.push(QueryReport {
            query: elements.clone(),
            matches,
        });
    }

    info!(
        queries = stats.get_queries(),
        matched = stats.get_values_matched(),
        avg_nodes = stats.avg_nodes_per_query(),
        "queries completed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&SearchReport { results, stats })?);
    }
    Ok(())
}

fn run_bench(params: WorkloadParams, capacities: &[usize], rounds: usize, json: bool) -> Result<(), WorkloadError> {
    let mut records: Vec<BenchRecord> = Vec::new();

    for &capacity in tqdm(capacities.iter()).desc(Some("capacities")) {
        if capacity == 0 {
            warn!("skipping capacity 0: sets need at least one element");
            continue;
        }

        records.extend(run_element_benchmarks(capacity, rounds));
        let (index_records, stats) = run_index_benchmark(&WorkloadParams { capacity, ..params }, rounds)?;
        info!(
            capacity,
            avg_nodes = stats.avg_nodes_per_query(),
            matched = stats.get_values_matched(),
            "index benchmark done"
        );
        records.extend(index_records);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{:<14} {:>10} {:<14} {:>12}", "structure", "capacity", "operation", "ns/op");
        for record in &records {
            println!(
                "{:<14} {:>10} {:<14} {:>12.2}",
                record.structure, record.capacity, record.operation, record.nanos_per_op
            );
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), WorkloadError> {
    match args.command {
        Command::Search { workload, json } => run_search(workload, json),
        Command::Generate {
            capacity,
            entries,
            removals,
            queries,
            entry_density,
            query_density,
            seed,
            output,
        } => {
            let params = WorkloadParams {
                capacity,
                num_entries: entries,
                num_removals: removals,
                num_queries: queries,
                entry_density,
                query_density,
                seed,
            };
            let workload = Workload::generate(&params)?;
            workload.save(&output)?;
            info!(path = %output.display(), ?params, "workload written");
            Ok(())
        }
        Command::Bench {
            capacity,
            rounds,
            entries,
            queries,
            seed,
            json,
        } => {
            let params = WorkloadParams {
                num_entries: entries,
                num_queries: queries,
                seed,
                ..WorkloadParams::default()
            };
            run_bench(params, &capacity, rounds, json)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
