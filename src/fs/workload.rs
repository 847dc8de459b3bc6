use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use rand::{SeedableRng, rngs::StdRng, seq::index::sample};
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{error::SetError, search::SubsetIndex, sets::fixed::FixedSet};

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("workload I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed workload file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workload does not fit its capacity: {0}")]
    Set(#[from] SetError),

    #[error("density must lie in [0, 1], got {0}")]
    InvalidDensity(f64),
}

/// A value together with the literal elements of the set it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub value: u32,
    pub elements: Vec<usize>,
}

impl Entry {
    pub fn to_set(&self, capacity: usize) -> Result<FixedSet, SetError> {
        FixedSet::from_elements(capacity, self.elements.iter().copied())
    }
}

/// Driver input: which sets to index, which to take back out, and which
/// subset queries to run afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub capacity: usize,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub removals: Vec<Entry>,
    #[serde(default)]
    pub queries: Vec<Vec<usize>>,
}

/// Knobs for [`Workload::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadParams {
    pub capacity: usize,
    pub num_entries: usize,
    pub num_removals: usize,
    pub num_queries: usize,
    /// Probability that a stored set contains any given element.
    pub entry_density: f64,
    /// Probability that a query contains any given element.
    pub query_density: f64,
    pub seed: u64,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        WorkloadParams {
            capacity: 64,
            num_entries: 1_000,
            num_removals: 0,
            num_queries: 100,
            entry_density: 0.1,
            query_density: 0.5,
            seed: 42,
        }
    }
}

fn bernoulli(density: f64) -> Result<Bernoulli, WorkloadError> {
    Bernoulli::new(density).map_err(|_| WorkloadError::InvalidDensity(density))
}

fn random_elements(rng: &mut StdRng, capacity: usize, coin: &Bernoulli) -> Vec<usize> {
    (0..capacity).filter(|_| coin.sample(rng)).collect()
}

impl Workload {
    pub fn load(path: &Path) -> Result<Self, WorkloadError> {
        let reader = BufReader::new(File::open(path)?);
        let workload: Workload = serde_json::from_reader(reader)?;
        debug!(
            path = %path.display(),
            entries = workload.entries.len(),
            queries = workload.queries.len(),
            "loaded workload"
        );
        Ok(workload)
    }

    pub fn save(&self, path: &Path) -> Result<(), WorkloadError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Draws a random workload. The same parameters always produce the same
    /// workload.
    pub fn generate(params: &WorkloadParams) -> Result<Self, WorkloadError> {
        let entry_coin = bernoulli(params.entry_density)?;
        let query_coin = bernoulli(params.query_density)?;
        let mut rng = StdRng::seed_from_u64(params.seed);

        let entries: Vec<Entry> = (0..params.num_entries)
            .map(|i| Entry {
                value: i as u32,
                elements: random_elements(&mut rng, params.capacity, &entry_coin),
            })
            .collect();

        let num_removals = params.num_removals.min(entries.len());
        let removals = sample(&mut rng, entries.len(), num_removals)
            .into_iter()
            .map(|i| entries[i].clone())
            .collect();

        let queries = (0..params.num_queries)
            .map(|_| random_elements(&mut rng, params.capacity, &query_coin))
            .collect();

        Ok(Workload {
            capacity: params.capacity,
            entries,
            removals,
            queries,
        })
    }

    /// Inserts every entry, then applies the removals.
    pub fn build_index(&self) -> Result<SubsetIndex<u32>, SetError> {
        let mut index = SubsetIndex::new(self.capacity);
        for entry in &self.entries {
            index.insert(entry.value, &entry.to_set(self.capacity)?)?;
        }

        for entry in &self.removals {
            if !index.remove(&entry.value, &entry.to_set(self.capacity)?)? {
                warn!(value = entry.value, elements = ?entry.elements, "removal matched no entry");
            }
        }

        Ok(index)
    }

    pub fn query_sets(&self) -> Result<Vec<FixedSet>, SetError> {
        self.queries
            .iter()
            .map(|elements| FixedSet::from_elements(self.capacity, elements.iter().copied()))
            .collect()
    }
}
