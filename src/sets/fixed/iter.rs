use std::iter::FusedIterator;

use crate::sets::fixed::{FixedSet, fixed_set::WORD_BITS};

/// Ascending iterator over the elements of a [`FixedSet`].
///
/// The iterator always rests on a present element or on the end position
/// (`capacity`). Cloning it yields an independent cursor at the same spot.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    set: &'a FixedSet,
    position: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(set: &'a FixedSet, start: usize) -> Self {
        let mut iter = Iter {
            set,
            position: start.min(set.capacity),
        };
        iter.seek();
        iter
    }

    /// Current cursor position; equals the set's capacity once exhausted.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to the first present element at or after `position`.
    fn seek(&mut self) {
        let capacity = self.set.capacity;
        while self.position < capacity {
            let word_index = self.position / WORD_BITS;
            let word = self.set.words[word_index] >> (self.position % WORD_BITS);
            if word != 0 {
                // pad bits are zero, so this never lands past capacity
                self.position += word.trailing_zeros() as usize;
                return;
            }
            self.position = (word_index + 1) * WORD_BITS;
        }
        self.position = capacity;
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.position >= self.set.capacity {
            return None;
        }

        let current = self.position;
        self.position += 1;
        self.seek();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.capacity - self.position;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Iter<'_> {}
