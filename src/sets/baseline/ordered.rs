use std::collections::BTreeSet;

use crate::sets::{baseline::ElementSet, fixed::FixedSet};

impl ElementSet for BTreeSet<usize> {
    const NAME: &'static str = "ordered";

    fn with_capacity(_capacity: usize) -> Self {
        BTreeSet::new()
    }

    fn insert(&mut self, element: usize) -> bool {
        BTreeSet::insert(self, element)
    }

    fn remove(&mut self, element: usize) -> bool {
        BTreeSet::remove(self, &element)
    }

    fn contains(&self, element: usize) -> bool {
        BTreeSet::contains(self, &element)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

/// # Panics
/// On zero capacity or out-of-range elements, which the fallible inherent
/// methods would report as errors.
impl ElementSet for FixedSet {
    const NAME: &'static str = "fixed";

    fn with_capacity(capacity: usize) -> Self {
        FixedSet::new(capacity).expect("baseline sets need a positive capacity")
    }

    fn insert(&mut self, element: usize) -> bool {
        self.add(element).expect("element out of range")
    }

    fn remove(&mut self, element: usize) -> bool {
        FixedSet::remove(self, element).expect("element out of range")
    }

    fn contains(&self, element: usize) -> bool {
        FixedSet::contains(self, element).expect("element out of range")
    }

    fn len(&self) -> usize {
        FixedSet::len(self)
    }
}
