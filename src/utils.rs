//! This module contains general purpose bit-level helpers shared by the
//! state model and the heuristics.

use std::{iter::Copied, slice::Iter};

use bitset_fixed::BitSet;

/// This structure defines an iterator capable of iterating over the 1-bits of
/// a fixed bitset. It uses word representation of the items in the set, so it
/// is more efficient than a crude iteration over the positions of the set.
///
/// # Example
/// ```
/// # use bitset_fixed::BitSet;
/// # use planner::utils::BitSetIter;
///
/// let mut bit_set = BitSet::new(70);
/// bit_set.set(1, true);
/// bit_set.set(4, true);
/// bit_set.set(66, true);
///
/// let ones = BitSetIter::new(&bit_set).collect::<Vec<_>>();
/// assert_eq!(vec![1, 4, 66], ones);
/// ```
pub struct BitSetIter<'a> {
    /// An iterator over the buffer of words of the bitset
    iter: Copied<Iter<'a, u64>>,
    /// The bits of the current word that have not been yielded yet
    word: u64,
    /// The value of position 0 in the current word
    base: usize,
}
impl BitSetIter<'_> {
    /// Creates an iterator for the given bitset.
    pub fn new(bs: &BitSet) -> BitSetIter {
        BitSetIter::from_words(bs.buffer())
    }
    /// Creates an iterator over the 1-bits of a raw word buffer.
    pub fn from_words(words: &[u64]) -> BitSetIter {
        let mut iter = words.iter().copied();
        let word = iter.next().unwrap_or(0);
        BitSetIter { iter, word, base: 0 }
    }
}
impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word == 0 {
            self.word = self.iter.next()?;
            self.base += 64;
        }
        let offset = self.word.trailing_zeros() as usize;
        // clear the lowest set bit
        self.word &= self.word - 1;
        Some(self.base + offset)
    }
}

/// Returns true iff every 1-bit of `sub` is also set in `sup`.
///
/// Both buffers are expected to have the same length.
pub fn is_subset(sub: &[u64], sup: &[u64]) -> bool {
    sub.iter().zip(sup.iter()).all(|(s, t)| s & !t == 0)
}

/// Returns true iff `a` and `b` have at least one 1-bit in common.
pub fn intersects(a: &[u64], b: &[u64]) -> bool {
    a.iter().zip(b.iter()).any(|(x, y)| x & y != 0)
}
