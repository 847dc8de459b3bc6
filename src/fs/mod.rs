//! File system I/O for driver workloads.
//!
//! A workload is a JSON description of the sets to index and the subset
//! queries to run; it can also be generated from a seed.

mod workload;

pub use workload::*;
