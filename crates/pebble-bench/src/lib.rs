//! Benchmark profiles for the pebble packing engine.
//!
//! - [`reference_profile`]: 200 unit pebbles in a radius-10, height-20 core
//!   (packing fraction 0.133)
//! - [`dense_profile`]: packing fraction 0.35 in the same core
//! - [`initial_positions`]: the sampler's output for a profile, seeded

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pebble_core::{MaterialId, MaterialWeights, Position};
use pebble_engine::{sample_positions, PackConfig};
use pebble_space::{Container, Cylinder, SpaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Radius 10, height 20, centred on the origin.
pub fn reference_core() -> Container {
    Cylinder::new(Position::origin(), 10.0, 20.0)
        .expect("reference core dimensions are valid")
        .into()
}

/// 200 unit pebbles in [`reference_core`].
pub fn reference_profile() -> (Container, PackConfig) {
    (reference_core(), PackConfig::with_count(1.0, 200))
}

/// Packing fraction 0.35 of unit pebbles in [`reference_core`] (about 525 pebbles).
///
/// Capped at 2000 contraction steps so a bench iteration stays bounded.
pub fn dense_profile() -> (Container, PackConfig) {
    let weights: MaterialWeights = [(MaterialId(0), 1.0)].into_iter().collect();
    (
        reference_core(),
        PackConfig::with_packing_fraction(1.0, 0.35, weights).max_iterations(2_000),
    )
}

/// Sampled starting positions for a profile.
pub fn initial_positions(
    container: &Container,
    config: &PackConfig,
    seed: u64,
) -> Result<Vec<Position>, SpaceError> {
    let n = config
        .count
        .or_else(|| {
            let pf = config.packing_fraction?;
            pebble_space::pf_to_n(container, config.pebble_radius, pf).ok()
        })
        .unwrap_or(0);
    let bounds = container.usable_bounds(config.pebble_radius)?;
    Ok(sample_positions(&bounds, n, &mut ChaCha8Rng::seed_from_u64(seed)))
}
