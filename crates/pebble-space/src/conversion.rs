//! Closed-form conversions between packing fraction and pebble count.
//!
//! All ratios are taken over the full container volume, not the usable
//! region: a packing fraction of 1 means the pebble volume equals the
//! interior volume of the container.

use crate::container::Container;
use crate::error::SpaceError;
use std::f64::consts::PI;

/// Hard ceiling on the packing fraction the engine will attempt.
///
/// Random close packing of equal spheres sits near 0.64; the relaxation
/// stalls well before that.
pub const MAX_PACKING_FRACTION: f64 = 0.60;

/// Volume of a single sphere of the given radius.
pub fn pebble_volume(pebble_radius: f64) -> f64 {
    (4.0 / 3.0) * PI * pebble_radius.powi(3)
}

/// Number of pebbles that fills `pf` of the container, floored.
pub fn pf_to_n(container: &Container, pebble_radius: f64, pf: f64) -> Result<usize, SpaceError> {
    let total = pf * container.volume()?;
    Ok((total / pebble_volume(pebble_radius)).floor() as usize)
}

/// Packing fraction of `n` pebbles in the container.
pub fn n_to_pf(container: &Container, pebble_radius: f64, n: usize) -> Result<f64, SpaceError> {
    Ok(packing_fraction_for_diameter(
        container.volume()?,
        n,
        2.0 * pebble_radius,
    ))
}

/// Packing fraction of `n` spheres of diameter `diameter` in `volume`.
///
/// The per-round form used by the relaxation, where the container volume
/// has already been resolved.
pub fn packing_fraction_for_diameter(volume: f64, n: usize, diameter: f64) -> f64 {
    n as f64 * pebble_volume(0.5 * diameter) / volume
}

/// Diameter at which `n` spheres would fill the whole container (`pf = 1`).
///
/// `2 * cbrt(3V / (4πn))`; the starting outer diameter of the relaxation.
pub fn equivalent_diameter(container: &Container, n: usize) -> Result<f64, SpaceError> {
    let volume = container.volume()?;
    Ok(2.0 * ((3.0 * volume) / (4.0 * PI * n as f64)).cbrt())
}
