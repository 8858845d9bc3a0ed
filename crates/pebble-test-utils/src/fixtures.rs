//! Reusable containers, RNGs and oracles.
//!
//! - [`reference_cylinder`]: radius 10, height 20, centred on the origin.
//! - [`brute_force_overlaps`]: exhaustive O(n²) overlap search.
//! - [`out_of_bounds`]: indices of centres outside the usable region.

use pebble_core::{distance, Position};
use pebble_space::{Container, Cylinder, UsableBounds};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Radius 10, height 20, zero buffer, centred on the origin.
pub fn reference_cylinder() -> Container {
    Cylinder::new(Position::origin(), 10.0, 20.0)
        .expect("reference cylinder dimensions are valid")
        .into()
}

/// Radius 3, height 4, buffer 0.25, off-axis so origin handling is exercised.
pub fn small_cylinder() -> Container {
    Cylinder::new(Position::new(1.5, -2.0, 7.0), 3.0, 4.0)
        .and_then(|c| c.with_buffer(0.25))
        .expect("small cylinder dimensions are valid")
        .into()
}

/// Deterministic RNG for reproducible tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Every pair closer than or exactly one pebble diameter apart.
pub fn brute_force_overlaps(positions: &[Position], pebble_radius: f64) -> Vec<(usize, usize, f64)> {
    let limit = 2.0 * pebble_radius;
    let mut out = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let d = distance(&positions[i], &positions[j]);
            if d <= limit {
                out.push((i, j, d));
            }
        }
    }
    out
}

/// Indices of centres lying outside `bounds`.
pub fn out_of_bounds(positions: &[Position], bounds: &UsableBounds) -> Vec<usize> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, p)| !bounds.contains(p))
        .map(|(i, _)| i)
        .collect()
}

/// `n` points uniform in the axis-aligned box `[0, side)³`.
pub fn random_box_positions<R: Rng + ?Sized>(rng: &mut R, n: usize, side: f64) -> Vec<Position> {
    (0..n)
        .map(|_| {
            Position::new(
                rng.random_range(0.0..side),
                rng.random_range(0.0..side),
                rng.random_range(0.0..side),
            )
        })
        .collect()
}
