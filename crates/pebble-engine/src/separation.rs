//! Randomised estimate of the minimum inter-pebble separation.
//!
//! Draws `n` distinct pebble pairs and keeps the shortest distance seen
//! (the Rabin-Lipton seed for nearest-neighbour search). The result bounds
//! the true minimum from above; more pebbles and denser packings make it
//! tighter. The relaxation uses it to size lattice cells.

use pebble_core::{distance, Position, RodKey};
use rand::Rng;
use std::collections::HashSet;

/// Shortest distance over a random sample of distinct pebble pairs.
///
/// Draws `min(n, n(n-1)/2)` pairs without repetition, so the duplicate
/// rejection loop always terminates. Returns `None` for fewer than two
/// pebbles.
pub fn estimate_separation<R: Rng + ?Sized>(positions: &[Position], rng: &mut R) -> Option<f64> {
    let n = positions.len();
    if n < 2 {
        return None;
    }
    let available = n.checked_mul(n - 1).map_or(usize::MAX, |p| p / 2);
    let draws = n.min(available);

    let mut seen: HashSet<RodKey> = HashSet::with_capacity(draws);
    let mut shortest = f64::INFINITY;
    while seen.len() < draws {
        let pair = draw_pair(n, rng);
        if seen.insert(pair) {
            shortest = shortest.min(distance(&positions[pair.lo()], &positions[pair.hi()]));
        }
    }
    log::debug!("separation estimate from {draws} pairs: {shortest}");
    Some(shortest)
}

/// Uniform random pair of distinct indices below `n` (`n >= 2`).
fn draw_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> RodKey {
    let first = rng.random_range(0..n);
    loop {
        if let Some(pair) = RodKey::new(first, rng.random_range(0..n)) {
            return pair;
        }
    }
}
