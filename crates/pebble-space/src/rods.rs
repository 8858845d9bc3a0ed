//! Overlap (rod) detection over a [`Lattice`].
//!
//! For every occupied cell the pebbles of its whole Moore neighbourhood are
//! pooled and compared pairwise. Pairs are canonicalised through
//! [`RodKey`], so the pooled pair set is the same whichever order the cells
//! are visited in. Pairs longer than one pebble diameter are not overlaps
//! and are never retained.
//!
//! The surviving rods are then thinned to the worst overlap per pebble by
//! [`reduce_to_worst_per_point`]. This is a greedy partial matching, not a
//! perfect one: tied rods all survive, so a pebble can still appear in more
//! than one rod.

use crate::lattice::Lattice;
use pebble_core::{distance, Position, RodKey, RodSet};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Every deduplicated pair that shares some occupied cell's Moore neighbourhood.
///
/// This is the unfiltered candidate set: distances are not examined.
pub fn candidate_pairs(lattice: &Lattice) -> BTreeSet<RodKey> {
    let mut pairs = BTreeSet::new();
    let mut pool = Vec::new();
    for (key, _) in lattice.cells() {
        lattice.gather_neighbourhood(key, &mut pool);
        for (offset, &a) in pool.iter().enumerate() {
            for &b in &pool[offset + 1..] {
                if let Some(rod) = RodKey::new(a, b) {
                    pairs.insert(rod);
                }
            }
        }
    }
    pairs
}

/// Retained overlap constraints for the current positions.
///
/// Returns an empty set when no candidate pair is closer than
/// `2 * pebble_radius`; the relaxation treats that as convergence.
pub fn detect_rods(lattice: &Lattice, positions: &[Position], pebble_radius: f64) -> RodSet {
    let limit = 2.0 * pebble_radius;
    let mut rods = RodSet::new();
    let mut pool = Vec::new();
    for (key, _) in lattice.cells() {
        lattice.gather_neighbourhood(key, &mut pool);
        for (offset, &a) in pool.iter().enumerate() {
            for &b in &pool[offset + 1..] {
                let Some(rod) = RodKey::new(a, b) else {
                    continue;
                };
                if rods.contains_key(&rod) {
                    continue;
                }
                let (Some(pa), Some(pb)) = (positions.get(a), positions.get(b)) else {
                    continue;
                };
                let length = distance(pa, pb);
                if length <= limit {
                    rods.insert(rod, length);
                }
            }
        }
    }
    reduce_to_worst_per_point(&mut rods);
    rods
}

/// Keep only each pebble's shortest rod.
///
/// Pebbles are visited in ascending index order; at each one, every rod
/// still touching it that is longer than its current shortest is dropped.
/// Ties survive, and a rod dropped at an earlier pebble no longer counts
/// towards a later pebble's minimum.
pub fn reduce_to_worst_per_point(rods: &mut RodSet) {
    let Some(last) = rods.keys().map(RodKey::hi).max() else {
        return;
    };
    let mut touching: Vec<SmallVec<[RodKey; 4]>> = vec![SmallVec::new(); last + 1];
    for key in rods.keys() {
        touching[key.lo()].push(*key);
        touching[key.hi()].push(*key);
    }
    for keys in &touching {
        let shortest = keys
            .iter()
            .filter_map(|k| rods.get(k).copied())
            .reduce(f64::min);
        let Some(shortest) = shortest else {
            continue;
        };
        for key in keys {
            if rods.get(key).is_some_and(|&len| len > shortest) {
                rods.remove(key);
            }
        }
    }
}
