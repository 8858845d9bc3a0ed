//! Rods: candidate overlap constraints between two pebble centres.
//!
//! A rod joins pebbles `i < j` and carries the Euclidean distance between
//! them. Rods are keyed by [`RodKey`], which canonicalises the pair so that
//! `(i, j)` and `(j, i)` always collapse to the same entry.

use std::collections::BTreeMap;
use std::fmt;

/// Canonical, unordered pair of distinct pebble indices (`lo < hi`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RodKey {
    lo: usize,
    hi: usize,
}

impl RodKey {
    /// Build the canonical key for the pair `{a, b}`.
    ///
    /// Returns `None` when `a == b`: a pebble cannot overlap itself.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller pebble index.
    pub fn lo(&self) -> usize {
        self.lo
    }

    /// The larger pebble index.
    pub fn hi(&self) -> usize {
        self.hi
    }
}

impl fmt::Display for RodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// Retained rods for one relaxation round, keyed by pair, valued by length.
///
/// A `BTreeMap` so that rods are visited in a fixed order: the pair mover
/// mutates positions in place, and the result depends on visit order.
pub type RodSet = BTreeMap<RodKey, f64>;

/// Length of the shortest rod (the worst overlap), if any.
pub fn min_rod_length(rods: &RodSet) -> Option<f64> {
    rods.values().copied().reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn key_rejects_self_pair() {
        assert!(RodKey::new(3, 3).is_none());
    }

    #[test]
    fn min_rod_length_empty_is_none() {
        assert_eq!(min_rod_length(&RodSet::new()), None);
    }

    #[test]
    fn min_rod_length_picks_shortest() {
        let mut rods = RodSet::new();
        rods.insert(RodKey::new(0, 1).unwrap(), 1.5);
        rods.insert(RodKey::new(2, 5).unwrap(), 0.25);
        rods.insert(RodKey::new(1, 4).unwrap(), 1.0);
        assert_eq!(min_rod_length(&rods), Some(0.25));
    }

    #[test]
    fn display_shows_canonical_pair() {
        assert_eq!(RodKey::new(9, 2).unwrap().to_string(), "(2, 9)");
    }

    proptest! {
        #[test]
        fn key_is_canonical(a in 0usize..1000, b in 0usize..1000) {
            prop_assume!(a != b);
            let k1 = RodKey::new(a, b).unwrap();
            let k2 = RodKey::new(b, a).unwrap();
            prop_assert_eq!(k1, k2);
            prop_assert!(k1.lo() < k1.hi());
            prop_assert_eq!((k1.lo(), k1.hi()), (a.min(b), a.max(b)));
        }
    }
}
