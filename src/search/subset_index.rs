use std::fmt::Debug;

use tracing::debug;

use crate::{
    error::{Result, SetError},
    search::node::{Branch, TrieNode},
    sets::fixed::FixedSet,
    statistics::Stats,
};

/// Index over a collection of [`FixedSet`]s answering "which stored sets are
/// subsets of this query?".
///
/// # Invariants
/// - The trie is exactly `capacity` levels deep: the node at depth `i` decides
///   bit `i`, with the `Present` child for sets containing it.
/// - Leaves hold the values of the sets matching their path, duplicates
///   included.
/// - Apart from the root, no node is ever both childless and value-less.
///
/// # Examples
/// ```
/// use binset::{search::SubsetIndex, sets::fixed::FixedSet};
///
/// let mut index = SubsetIndex::new(8);
/// index.insert(101, &FixedSet::from_elements(8, [1, 3]).unwrap()).unwrap();
/// index.insert(102, &FixedSet::from_elements(8, [1]).unwrap()).unwrap();
/// index.insert(103, &FixedSet::from_elements(8, [1, 3, 5]).unwrap()).unwrap();
///
/// let query = FixedSet::from_elements(8, [1, 3, 4, 6]).unwrap();
/// let mut found = index.find_subsets(&query).unwrap();
/// found.sort();
/// assert_eq!(found, vec![101, 102]);
/// ```
pub struct SubsetIndex<V = u32> {
    root: TrieNode<V>,
    capacity: usize,
    len: usize,
}

/// One level of a recorded descent: the branch taken out of the node at that
/// depth, and whether that node keeps payload or another child regardless.
struct Step {
    branch: Branch,
    keeps_other: bool,
}

impl<V> SubsetIndex<V> {
    /// Creates an empty index for sets over `[0, capacity)`. Any capacity is
    /// accepted; with capacity 0 the root is the single leaf.
    pub fn new(capacity: usize) -> Self {
        SubsetIndex {
            root: TrieNode::new(),
            capacity,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored value entries, duplicates counted separately.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry, keeping only the root.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.len = 0;
    }

    /// Number of live trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    /// Associates `value` with `set`. Neither needs to be unique.
    ///
    /// # Errors
    /// [`SetError::CapacityMismatch`] if `set` has a different capacity.
    pub fn insert(&mut self, value: V, set: &FixedSet) -> Result<()> {
        self.validate_capacity(set)?;

        let mut node = &mut self.root;
        for i in 0..self.capacity {
            node = node.child_or_insert(Branch::from_bit(set.get_bit(i)));
        }

        node.values.push(value);
        self.len += 1;
        Ok(())
    }

    fn validate_capacity(&self, set: &FixedSet) -> Result<()> {
        if set.capacity() != self.capacity {
            return Err(SetError::CapacityMismatch {
                expected: self.capacity,
                found: set.capacity(),
            });
        }
        Ok(())
    }

    fn descend_mut(&mut self, steps: &[Step]) -> Option<&mut TrieNode<V>> {
        let mut node = &mut self.root;
        for step in steps {
            node = node.child_mut(step.branch)?;
        }
        Some(node)
    }

    /// Collects the leaves reachable through subset-consistent paths, one
    /// frontier per level.
    fn subset_leaves(&self, query: &FixedSet, stats: &mut Stats) -> Vec<&TrieNode<V>> {
        let mut current: Vec<&TrieNode<V>> = vec![&self.root];
        let mut next: Vec<&TrieNode<V>> = Vec::new();
        stats.bump_nodes_visited(1);

        for i in 0..self.capacity {
            if current.is_empty() {
                break;
            }

            next.clear();
            let query_has_bit = query.get_bit(i);
            for &node in &current {
                // a subset may only hold bit i if the query does
                next.extend(node.child(Branch::Absent));
                if query_has_bit {
                    next.extend(node.child(Branch::Present));
                }
            }

            stats.bump_nodes_visited(next.len());
            std::mem::swap(&mut current, &mut next);
        }

        current
    }
}

impl<V: PartialEq> SubsetIndex<V> {
    /// Removes one entry of `value` stored under exactly `set`, then prunes the
    /// branch if it no longer leads to any value.
    ///
    /// Returns `false` if no such entry exists. When duplicates exist only the
    /// first match goes; the order of the remaining entries is not preserved.
    ///
    /// # Errors
    /// [`SetError::CapacityMismatch`] if `set` has a different capacity.
    pub fn remove(&mut self, value: &V, set: &FixedSet) -> Result<bool> {
        self.validate_capacity(set)?;

        let mut path: Vec<Step> = Vec::with_capacity(self.capacity);
        let mut node = &self.root;
        for i in 0..self.capacity {
            let branch = Branch::from_bit(set.get_bit(i));
            path.push(Step {
                branch,
                keeps_other: !node.values.is_empty() || node.child(branch.other()).is_some(),
            });
            match node.child(branch) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }

        let Some(position) = node.values.iter().position(|stored| stored == value) else {
            return Ok(false);
        };

        let Some(leaf) = self.descend_mut(&path) else {
            return Ok(false);
        };
        leaf.values.swap_remove(position);
        let leaf_is_dead = leaf.is_dead();
        self.len -= 1;

        if leaf_is_dead && !path.is_empty() {
            // Every node below the deepest ancestor that keeps something else
            // is now dead; the root is never detached.
            let cut = path.iter().rposition(|step| step.keeps_other).unwrap_or(0);
            let branch = path[cut].branch;
            if let Some(parent) = self.descend_mut(&path[..cut]) {
                parent.detach(branch);
                debug!(depth = cut, pruned = path.len() - cut, "pruned dead branch");
            }
        }

        Ok(true)
    }
}

impl<V: Clone> SubsetIndex<V> {
    /// Returns the values of every stored set that is a subset of `query`.
    ///
    /// The output order is unspecified; sort it if determinism matters.
    ///
    /// # Errors
    /// [`SetError::CapacityMismatch`] if `query` has a different capacity.
    pub fn find_subsets(&self, query: &FixedSet) -> Result<Vec<V>> {
        let mut stats = Stats::new();
        self.find_subsets_with_stats(query, &mut stats)
    }

    /// Same as [`find_subsets`](SubsetIndex::find_subsets), recording the
    /// traversal into `stats`.
    pub fn find_subsets_with_stats(&self, query: &FixedSet, stats: &mut Stats) -> Result<Vec<V>> {
        self.validate_capacity(query)?;
        stats.bump_queries();

        let leaves = self.subset_leaves(query, stats);
        let total_values = leaves.iter().map(|leaf| leaf.values.len()).sum();

        let mut result = Vec::with_capacity(total_values);
        for leaf in leaves {
            result.extend(leaf.values.iter().cloned());
        }

        stats.bump_values_matched(result.len());
        Ok(result)
    }
}

impl<V: Debug> Debug for SubsetIndex<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsetIndex")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn set(capacity: usize, elements: &[usize]) -> FixedSet {
        FixedSet::from_elements(capacity, elements.iter().copied()).unwrap()
    }

    fn sorted(mut values: Vec<u32>) -> Vec<u32> {
        values.sort_unstable();
        values
    }

    #[test]
    fn new_index_is_empty() {
        let index = SubsetIndex::<u32>::new(10);
        assert_eq!(index.capacity(), 10);
        assert!(index.is_empty());
        assert_eq!(index.node_count(), 1);
        assert!(
            index
                .find_subsets(&FixedSet::filled(10).unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn subset_query_scenario() {
        let mut index = SubsetIndex::new(8);
        index.insert(101, &set(8, &[1, 3])).unwrap();
        index.insert(102, &set(8, &[1])).unwrap();
        index.insert(103, &set(8, &[1, 3, 5])).unwrap();

        let found = index.find_subsets(&set(8, &[1, 3, 4, 6])).unwrap();
        assert_eq!(sorted(found), vec![101, 102]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn insert_builds_one_path_per_distinct_set() {
        let mut index = SubsetIndex::new(4);
        index.insert(1, &set(4, &[0])).unwrap();
        assert_eq!(index.node_count(), 5);

        // same set again shares the whole path
        index.insert(2, &set(4, &[0])).unwrap();
        assert_eq!(index.node_count(), 5);

        // diverges at the last bit only
        index.insert(3, &set(4, &[0, 3])).unwrap();
        assert_eq!(index.node_count(), 6);
    }

    #[test]
    fn capacity_mismatch_is_rejected() {
        let mut index = SubsetIndex::new(8);
        let wrong = set(9, &[1]);
        let mismatch = SetError::CapacityMismatch {
            expected: 8,
            found: 9,
        };

        assert_eq!(index.insert(1, &wrong).unwrap_err(), mismatch);
        assert_eq!(index.remove(&1, &wrong).unwrap_err(), mismatch);
        assert_eq!(index.find_subsets(&wrong).unwrap_err(), mismatch);
        assert!(index.is_empty());
        assert_eq!(index.node_count(), 1);
    }

    #[test]
    fn empty_set_is_subset_of_everything() {
        let mut index = SubsetIndex::new(6);
        index.insert(7, &FixedSet::new(6).unwrap()).unwrap();

        assert_eq!(index.find_subsets(&FixedSet::new(6).unwrap()).unwrap(), vec![7]);
        assert_eq!(index.find_subsets(&set(6, &[2, 5])).unwrap(), vec![7]);
    }

    #[test]
    fn full_query_finds_every_stored_set() {
        let mut index = SubsetIndex::new(5);
        let stored = [vec![], vec![0], vec![4], vec![1, 2, 3], vec![0, 1, 2, 3, 4]];
        for (value, elements) in stored.iter().enumerate() {
            index.insert(value as u32, &set(5, elements)).unwrap();
        }

        let found = index.find_subsets(&FixedSet::filled(5).unwrap()).unwrap();
        assert_eq!(sorted(found), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn find_with_no_subsets() {
        let mut index = SubsetIndex::new(6);
        index.insert(1, &set(6, &[0, 1])).unwrap();
        index.insert(2, &set(6, &[5])).unwrap();

        assert!(index.find_subsets(&set(6, &[0, 2, 3])).unwrap().is_empty());
        assert!(index.find_subsets(&FixedSet::new(6).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn find_on_mixed_paths() {
        let mut index = SubsetIndex::new(10);
        index.insert(1, &set(10, &[0, 2])).unwrap();
        index.insert(2, &set(10, &[2, 9])).unwrap();
        index.insert(3, &set(10, &[9])).unwrap();
        index.insert(4, &set(10, &[0, 1, 2])).unwrap();

        assert_eq!(sorted(index.find_subsets(&set(10, &[0, 2, 9])).unwrap()), vec![1, 2, 3]);
        assert_eq!(sorted(index.find_subsets(&set(10, &[0, 1, 2])).unwrap()), vec![1, 4]);
        assert_eq!(sorted(index.find_subsets(&set(10, &[9])).unwrap()), vec![3]);
    }

    #[test]
    fn remove_makes_entry_disappear() {
        let mut index = SubsetIndex::new(8);
        let a = set(8, &[1, 3]);
        let b = set(8, &[1]);
        index.insert(101, &a).unwrap();
        index.insert(102, &b).unwrap();

        assert!(index.remove(&101, &a).unwrap());
        assert_eq!(index.find_subsets(&set(8, &[1, 3])).unwrap(), vec![102]);
        assert_eq!(index.len(), 1);

        index.insert(101, &a).unwrap();
        assert_eq!(sorted(index.find_subsets(&set(8, &[1, 3])).unwrap()), vec![101, 102]);
    }

    #[test]
    fn remove_missing_entries_returns_false() {
        let mut index = SubsetIndex::new(8);
        let a = set(8, &[1, 3]);
        index.insert(101, &a).unwrap();

        // path does not exist
        assert!(!index.remove(&101, &set(8, &[2])).unwrap());
        // path exists, value does not
        assert!(!index.remove(&999, &a).unwrap());
        // path is a prefix of a stored one but differs at the end
        assert!(!index.remove(&101, &set(8, &[1, 3, 7])).unwrap());

        assert_eq!(index.len(), 1);
        assert_eq!(index.find_subsets(&a).unwrap(), vec![101]);
    }

    #[test]
    fn duplicates_are_removed_one_at_a_time() {
        let mut index = SubsetIndex::new(4);
        let a = set(4, &[2]);
        index.insert(5, &a).unwrap();
        index.insert(5, &a).unwrap();
        index.insert(6, &a).unwrap();

        assert_eq!(sorted(index.find_subsets(&a).unwrap()), vec![5, 5, 6]);
        assert!(index.remove(&5, &a).unwrap());
        assert_eq!(sorted(index.find_subsets(&a).unwrap()), vec![5, 6]);
        assert!(index.remove(&5, &a).unwrap());
        assert!(!index.remove(&5, &a).unwrap());
        assert_eq!(index.find_subsets(&a).unwrap(), vec![6]);
    }

    #[test]
    fn removing_the_only_entry_prunes_back_to_root() {
        let mut index = SubsetIndex::new(16);
        let a = set(16, &[0, 7, 15]);
        index.insert(1, &a).unwrap();
        assert_eq!(index.node_count(), 17);

        assert!(index.remove(&1, &a).unwrap());
        assert_eq!(index.node_count(), 1);
        assert!(index.is_empty());
    }

    #[test]
    fn pruning_stops_at_shared_ancestor() {
        let mut index = SubsetIndex::new(8);
        let keep = set(8, &[0, 1]);
        let gone = set(8, &[0, 5]);
        index.insert(1, &keep).unwrap();
        let before = index.node_count();

        index.insert(2, &gone).unwrap();
        // paths share the root and the depth-1 node, then split on bit 1
        assert_eq!(index.node_count(), before + 7);

        assert!(index.remove(&2, &gone).unwrap());
        assert_eq!(index.node_count(), before);
        assert_eq!(index.find_subsets(&FixedSet::filled(8).unwrap()).unwrap(), vec![1]);
        assert!(index.find_subsets(&gone).unwrap().is_empty());
    }

    #[test]
    fn removing_a_non_last_value_keeps_the_path() {
        let mut index = SubsetIndex::new(6);
        let a = set(6, &[3]);
        index.insert(10, &a).unwrap();
        index.insert(20, &a).unwrap();
        index.insert(30, &a).unwrap();
        let nodes = index.node_count();

        assert!(index.remove(&10, &a).unwrap());
        assert_eq!(index.node_count(), nodes);
        assert_eq!(sorted(index.find_subsets(&a).unwrap()), vec![20, 30]);
    }

    #[test]
    fn partial_pruning_keeps_sibling_paths() {
        let mut index = SubsetIndex::new(6);
        let left = set(6, &[]);
        let right = set(6, &[5]);
        let far = set(6, &[0, 1, 2]);
        index.insert(1, &left).unwrap();
        index.insert(2, &right).unwrap();
        index.insert(3, &far).unwrap();

        assert!(index.remove(&2, &right).unwrap());
        // only the present-leaf at depth 6 goes
        assert_eq!(index.node_count(), 1 + 6 + 6);
        assert_eq!(index.find_subsets(&set(6, &[5])).unwrap(), vec![1]);

        assert!(index.remove(&1, &left).unwrap());
        assert_eq!(index.node_count(), 1 + 6);
        assert_eq!(index.find_subsets(&far).unwrap(), vec![3]);

        assert!(index.remove(&3, &far).unwrap());
        assert_eq!(index.node_count(), 1);
    }

    #[test]
    fn zero_capacity_index_uses_root_as_leaf() {
        let mut index = SubsetIndex::new(0);
        let empty = FixedSet::default();
        index.insert(1, &empty).unwrap();
        index.insert(2, &empty).unwrap();
        assert_eq!(sorted(index.find_subsets(&empty).unwrap()), vec![1, 2]);

        assert!(index.remove(&1, &empty).unwrap());
        assert!(index.remove(&2, &empty).unwrap());
        assert_eq!(index.node_count(), 1);
        assert!(index.find_subsets(&empty).unwrap().is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut index = SubsetIndex::new(70);
        for v in 0..10u32 {
            index.insert(v, &set(70, &[v as usize, 64])).unwrap();
        }
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.node_count(), 1);
        assert!(index.find_subsets(&FixedSet::filled(70).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn stats_record_the_traversal() {
        let mut index = SubsetIndex::new(3);
        index.insert(1, &set(3, &[0])).unwrap();
        index.insert(2, &set(3, &[1])).unwrap();

        let mut stats = Stats::new();
        let found = index.find_subsets_with_stats(&set(3, &[0]), &mut stats).unwrap();
        assert_eq!(found, vec![1]);
        assert_eq!(stats.get_queries(), 1);
        assert_eq!(stats.get_values_matched(), 1);
        // root, both depth-1 nodes, then a single surviving node per level
        assert_eq!(stats.get_nodes_visited(), 1 + 2 + 1 + 1);
    }

    #[test]
    fn deep_trie_drops_without_recursion() {
        let capacity = 200_000;
        let mut index = SubsetIndex::new(capacity);
        index.insert(1u32, &FixedSet::filled(capacity).unwrap()).unwrap();
        assert_eq!(index.node_count(), capacity + 1);
        drop(index);
    }

    #[test]
    fn matches_brute_force_under_random_churn() {
        let capacity = 12;
        let mut rng = StdRng::seed_from_u64(42);
        let mut index = SubsetIndex::new(capacity);
        let mut reference: Vec<(u32, FixedSet)> = Vec::new();

        let random_set = |rng: &mut StdRng| {
            let mut s = FixedSet::new(capacity).unwrap();
            for i in 0..capacity {
                if rng.random_bool(0.3) {
                    s.add(i).unwrap();
                }
            }
            s
        };

        for round in 0..400 {
            if reference.is_empty() || rng.random_bool(0.6) {
                let value = rng.random_range(0..20u32);
                let s = random_set(&mut rng);
                index.insert(value, &s).unwrap();
                reference.push((value, s));
            } else {
                let victim = rng.random_range(0..reference.len());
                let (value, s) = reference.swap_remove(victim);
                assert!(index.remove(&value, &s).unwrap(), "round {}", round);
            }

            let query = random_set(&mut rng);
            let mut expected: Vec<u32> = reference
                .iter()
                .filter(|(_, s)| s.is_subset_of(&query).unwrap())
                .map(|(v, _)| *v)
                .collect();
            expected.sort_unstable();
            assert_eq!(sorted(index.find_subsets(&query).unwrap()), expected);
            assert_eq!(index.len(), reference.len());
        }

        for (value, s) in reference.drain(..) {
            assert!(index.remove(&value, &s).unwrap());
        }
        assert_eq!(index.node_count(), 1);
    }
}
