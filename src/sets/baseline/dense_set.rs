use crate::sets::baseline::ElementSet;

/// Dense boolean-array baseline: one `bool` per element of the universe.
#[derive(Debug, Clone)]
pub struct DenseSet {
    flags: Vec<bool>,
    len: usize,
}

impl ElementSet for DenseSet {
    const NAME: &'static str = "dense";

    fn with_capacity(capacity: usize) -> Self {
        DenseSet {
            flags: vec![false; capacity],
            len: 0,
        }
    }

    fn insert(&mut self, element: usize) -> bool {
        let was_present = std::mem::replace(&mut self.flags[element], true);
        if !was_present {
            self.len += 1;
        }
        !was_present
    }

    fn remove(&mut self, element: usize) -> bool {
        let was_present = std::mem::replace(&mut self.flags[element], false);
        if was_present {
            self.len -= 1;
        }
        was_present
    }

    fn contains(&self, element: usize) -> bool {
        self.flags[element]
    }

    fn len(&self) -> usize {
        self.len
    }
}
