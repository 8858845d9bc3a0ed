//! Random initial placement of pebble centres.

use pebble_core::Position;
use pebble_space::UsableBounds;
use rand::Rng;
use std::f64::consts::TAU;

/// Scatter `n` pebble centres inside `bounds`.
///
/// Per pebble, in draw order: a radial fraction `f ∈ [0, 1)`, an angle
/// `θ ∈ [0, 2π)`, and an axial coordinate in `[z_low, z_up]`. The planar
/// offset from the axis is `f · r_max` along `θ`, so centres are uniform in
/// radius (and therefore denser towards the axis), not uniform in area.
pub fn sample_positions<R: Rng + ?Sized>(
    bounds: &UsableBounds,
    n: usize,
    rng: &mut R,
) -> Vec<Position> {
    let (cx, cy) = bounds.centre();
    (0..n)
        .map(|_| {
            let f: f64 = rng.random();
            let theta = rng.random_range(0.0..TAU);
            let z = rng.random_range(bounds.z_low()..=bounds.z_up());
            let r = f * bounds.r_max();
            Position::new(cx + r * theta.cos(), cy + r * theta.sin(), z)
        })
        .collect()
}
