use std::hash::{BuildHasherDefault, Hasher};

use crate::sets::baseline::ElementSet;

/// Identity hasher for `usize` keys: the key is its own hash.
#[derive(Default)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    fn write(&mut self, _bytes: &[u8]) {
        panic!("This hasher only accepts u64/usize keys");
    }

    fn write_usize(&mut self, i: usize) {
        self.hash = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

/// Hashed-set baseline, keyed directly by element index.
pub type IntegerSet = hashbrown::HashSet<usize, BuildHasherDefault<NoOpHasher>>;

impl ElementSet for IntegerSet {
    const NAME: &'static str = "hashed";

    fn with_capacity(capacity: usize) -> Self {
        IntegerSet::with_capacity_and_hasher(capacity, BuildHasherDefault::default())
    }

    fn insert(&mut self, element: usize) -> bool {
        hashbrown::HashSet::insert(self, element)
    }

    fn remove(&mut self, element: usize) -> bool {
        hashbrown::HashSet::remove(self, &element)
    }

    fn contains(&self, element: usize) -> bool {
        hashbrown::HashSet::contains(self, &element)
    }

    fn len(&self) -> usize {
        hashbrown::HashSet::len(self)
    }
}
