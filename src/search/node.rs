use std::fmt::Debug;

/// Which child a descent takes at one bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The indexed set does not contain the bit.
    Absent,
    /// The indexed set contains the bit.
    Present,
}

impl Branch {
    pub fn from_bit(present: bool) -> Self {
        if present {
            Branch::Present
        } else {
            Branch::Absent
        }
    }

    pub fn other(self) -> Self {
        match self {
            Branch::Absent => Branch::Present,
            Branch::Present => Branch::Absent,
        }
    }
}

/// One decision level of the subset trie. Children are owned exclusively by
/// their parent; leaves (depth == capacity) carry the stored values.
pub struct TrieNode<V> {
    pub values: Vec<V>,
    absent: Option<Box<TrieNode<V>>>,
    present: Option<Box<TrieNode<V>>>,
}

impl<V> TrieNode<V> {
    pub fn new() -> Self {
        TrieNode {
            values: Vec::new(),
            absent: None,
            present: None,
        }
    }

    pub fn child(&self, branch: Branch) -> Option<&TrieNode<V>> {
        match branch {
            Branch::Absent => self.absent.as_deref(),
            Branch::Present => self.present.as_deref(),
        }
    }

    pub fn child_mut(&mut self, branch: Branch) -> Option<&mut TrieNode<V>> {
        match branch {
            Branch::Absent => self.absent.as_deref_mut(),
            Branch::Present => self.present.as_deref_mut(),
        }
    }

    /// Returns the child on `branch`, allocating it first if missing.
    pub fn child_or_insert(&mut self, branch: Branch) -> &mut TrieNode<V> {
        let slot = match branch {
            Branch::Absent => &mut self.absent,
            Branch::Present => &mut self.present,
        };
        slot.get_or_insert_with(|| Box::new(TrieNode::new()))
    }

    /// Drops the whole subtree hanging off `branch`.
    pub fn detach(&mut self, branch: Branch) -> Option<Box<TrieNode<V>>> {
        match branch {
            Branch::Absent => self.absent.take(),
            Branch::Present => self.present.take(),
        }
    }

    pub fn has_children(&self) -> bool {
        self.absent.is_some() || self.present.is_some()
    }

    /// A node with neither payload nor children is dead weight in the trie.
    pub fn is_dead(&self) -> bool {
        self.values.is_empty() && !self.has_children()
    }

    /// Counts this node and every node below it.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.absent.as_deref());
            stack.extend(node.present.as_deref());
        }
        count
    }
}

// Tries are as deep as their capacity; tear them down iteratively so that
// dropping a long chain never recurses once per level.
impl<V> Drop for TrieNode<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<TrieNode<V>>> = Vec::new();
        stack.extend(self.absent.take());
        stack.extend(self.present.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.absent.take());
            stack.extend(node.present.take());
        }
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        TrieNode::new()
    }
}

impl<V: Debug> Debug for TrieNode<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("values", &self.values)
            .field("absent", &self.absent)
            .field("present", &self.present)
            .finish()
    }
}
