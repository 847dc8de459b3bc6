use serde::Serialize;

/// Traversal counters for subset queries, accumulated per worker and merged
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    queries: usize,
    nodes_visited: usize,
    values_matched: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            queries: 0,
            nodes_visited: 0,
            values_matched: 0,
        }
    }

    /// Record into the statistics object that a new subset query has been performed
    pub fn bump_queries(&mut self) {
        self.queries += 1
    }

    /// Record that a bunch of trie nodes entered the traversal frontier
    pub fn bump_nodes_visited(&mut self, node_amount: usize) {
        self.nodes_visited += node_amount
    }

    pub fn bump_values_matched(&mut self, value_amount: usize) {
        self.values_matched += value_amount
    }

    pub fn get_queries(&self) -> usize {
        self.queries
    }

    pub fn get_nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    pub fn get_values_matched(&self) -> usize {
        self.values_matched
    }

    /// Sums two statistics objects, e.g. the local counters of two workers.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            queries: self.queries + other.queries,
            nodes_visited: self.nodes_visited + other.nodes_visited,
            values_matched: self.values_matched + other.values_matched,
        }
    }

    /// Average number of trie nodes touched per query, 0 when nothing ran.
    pub fn avg_nodes_per_query(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            self.nodes_visited as f64 / self.queries as f64
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}
