//! The propositional state: a total assignment of truth values over a fixed
//! number of propositions, stored as a fixed size bitset.

use std::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use bitset_fixed::BitSet;

use crate::utils::{intersects, is_subset, BitSetIter};

/// A fixed-length bit vector indexed by proposition id.
///
/// The same type is used for complete states and for requirement sets
/// (preconditions, goals, effects): a requirement set is simply the set of
/// propositions that must be true. Two states are equal iff they agree on
/// every proposition.
#[derive(Clone)]
pub struct State {
    bits: BitSet,
    nb_props: usize,
}

impl State {
    /// Creates a state over `nb_props` propositions where nothing holds.
    pub fn new(nb_props: usize) -> Self {
        State {
            bits: BitSet::new(nb_props),
            nb_props,
        }
    }
    /// Creates a state where exactly the propositions yielded by `props` hold.
    ///
    /// # Panics
    /// When one of the ids is not smaller than `nb_props`.
    pub fn with_true<I>(nb_props: usize, props: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut state = State::new(nb_props);
        for p in props {
            state.set(p, true);
        }
        state
    }
    /// Creates a state from an explicit truth assignment.
    pub fn from_bools(values: &[bool]) -> Self {
        let ones = values.iter().enumerate().filter(|(_, v)| **v).map(|(i, _)| i);
        State::with_true(values.len(), ones)
    }

    /// The number of propositions this state assigns.
    pub fn nb_propositions(&self) -> usize {
        self.nb_props
    }
    /// Returns the truth value of proposition `p`.
    ///
    /// # Panics
    /// When `p` is not below `nb_propositions()`.
    pub fn get(&self, p: usize) -> bool {
        assert!(p < self.nb_props, "proposition {p} out of range");
        (self.bits.buffer()[p / 64] >> (p % 64)) & 1 == 1
    }
    /// Sets the truth value of proposition `p`.
    ///
    /// # Panics
    /// When `p` is not below `nb_propositions()`.
    pub fn set(&mut self, p: usize, value: bool) {
        assert!(p < self.nb_props, "proposition {p} out of range");
        self.bits.set(p, value);
    }
    /// The number of propositions that hold.
    pub fn count_true(&self) -> usize {
        self.words().iter().map(|w| w.count_ones() as usize).sum()
    }
    /// Iterates over the ids of the propositions that hold, in increasing order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter::from_words(self.words())
    }

    /// Returns true iff every proposition true in `requirement` is also true
    /// in `self`. This is the precondition and goal test.
    pub fn satisfies(&self, requirement: &State) -> bool {
        debug_assert_eq!(self.nb_props, requirement.nb_props);
        is_subset(requirement.words(), self.words())
    }
    /// Returns true iff both states have at least one true proposition in common.
    pub fn intersects(&self, other: &State) -> bool {
        debug_assert_eq!(self.nb_props, other.nb_props);
        intersects(self.words(), other.words())
    }
    /// self <- self OR other
    pub fn union_with(&mut self, other: &State) {
        debug_assert_eq!(self.nb_props, other.nb_props);
        for (w, o) in self.words_mut().iter_mut().zip(other.words()) {
            *w |= o;
        }
    }
    /// self <- self AND other
    pub fn intersect_with(&mut self, other: &State) {
        debug_assert_eq!(self.nb_props, other.nb_props);
        for (w, o) in self.words_mut().iter_mut().zip(other.words()) {
            *w &= o;
        }
    }
    /// self <- self AND NOT other
    pub fn difference_with(&mut self, other: &State) {
        debug_assert_eq!(self.nb_props, other.nb_props);
        for (w, o) in self.words_mut().iter_mut().zip(other.words()) {
            *w &= !o;
        }
    }

    pub(crate) fn words(&self) -> &[u64] {
        self.bits.buffer()
    }
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        self.bits.buffer_mut()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.nb_props == other.nb_props && self.words() == other.words()
    }
}
impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nb_props.hash(state);
        self.words().hash(state);
    }
}

/// Renders the assignment as a string of 0/1 digits, proposition 0 first.
impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in 0..self.nb_props {
            write!(f, "{}", if self.get(p) { '1' } else { '0' })?;
        }
        Ok(())
    }
}
impl Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfies_is_reflexive() {
        for bits in 0..16_u32 {
            let values = (0..4).map(|i| bits & (1 << i) != 0).collect::<Vec<_>>();
            let s = State::from_bools(&values);
            assert!(s.satisfies(&s), "{s} should satisfy itself");
        }
    }

    #[test]
    fn satisfies_checks_inclusion_of_true_propositions() {
        let s = State::with_true(5, [0, 2, 4]);
        assert!(s.satisfies(&State::new(5)));
        assert!(s.satisfies(&State::with_true(5, [0, 4])));
        assert!(!s.satisfies(&State::with_true(5, [1])));
        assert!(!s.satisfies(&State::with_true(5, [0, 3])));
    }

    #[test]
    fn satisfies_across_word_boundaries() {
        let s = State::with_true(130, [3, 64, 129]);
        assert!(s.satisfies(&State::with_true(130, [64, 129])));
        assert!(!s.satisfies(&State::with_true(130, [65])));
    }

    #[test]
    fn equality_and_hash_follow_content() {
        use std::collections::hash_map::DefaultHasher;

        let a = State::with_true(3, [1]);
        let mut b = State::new(3);
        b.set(0, true);
        b.set(1, true);
        b.set(0, false);
        assert_eq!(a, b);

        let hash = |s: &State| {
            let mut h = DefaultHasher::new();
            s.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
        assert_ne!(a, State::with_true(4, [1]));
    }

    #[test]
    fn set_operations() {
        let mut s = State::with_true(4, [0, 1]);
        s.union_with(&State::with_true(4, [3]));
        assert_eq!(State::with_true(4, [0, 1, 3]), s);
        s.difference_with(&State::with_true(4, [1, 2]));
        assert_eq!(State::with_true(4, [0, 3]), s);
        let mut t = s.clone();
        t.intersect_with(&State::with_true(4, [1, 3]));
        assert_eq!(State::with_true(4, [3]), t);
        assert_eq!(vec![0, 3], s.iter().collect::<Vec<_>>());
        assert_eq!(2, s.count_true());
        assert!(s.intersects(&State::with_true(4, [3])));
        assert!(!s.intersects(&State::with_true(4, [1, 2])));
        assert_eq!("1001", s.to_string());
    }
}
