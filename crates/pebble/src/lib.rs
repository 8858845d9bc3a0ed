//! Pebble: random packing of equal spheres into cylindrical cores.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the pebble sub-crates. Pebble centres are scattered inside the usable
//! region of a cylinder and relaxed with the Jodrey-Tory algorithm until no
//! two pebbles overlap, or until the run reports how close it got.
//!
//! # Quick start
//!
//! ```rust
//! use pebble::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! // A core of radius 10 and height 20, centred on the origin.
//! let core: Container = Cylinder::new(Position::origin(), 10.0, 20.0).unwrap().into();
//!
//! // Ask for a packing fraction rather than a count; weights are carried
//! // through for downstream material assignment.
//! let weights: MaterialWeights = [(MaterialId(1), 1.0)].into_iter().collect();
//! let config = PackConfig::with_packing_fraction(1.0, 0.05, weights);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let packing = pack(&core, &config, &mut rng).unwrap();
//! assert_eq!(packing.positions.len(), packing.report.target.count());
//! assert_eq!(packing.report.state, RelaxationState::Converged);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pebble-core` | Positions, material ids, rods |
//! | [`space`] | `pebble-space` | Containers, bounds, conversions, lattice, rod detection |
//! | [`engine`] | `pebble-engine` | Configuration, sampler, relaxation, `pack` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`pebble-core`).
///
/// [`types::Position`], [`types::MaterialId`], and the rod types
/// [`types::RodKey`] and [`types::RodSet`].
pub use pebble_core as types;

/// Geometry and overlap detection (`pebble-space`).
///
/// [`space::Container`] and its [`space::Cylinder`] variant, the
/// [`space::UsableBounds`] a pebble centre must stay in, packing-fraction
/// conversions, and the [`space::Lattice`] used by [`space::detect_rods`].
pub use pebble_space as space;

/// Packing engine (`pebble-engine`).
///
/// [`engine::pack()`] for whole runs; [`engine::JodreyTory`] to drive the
/// relaxation round by round.
pub use pebble_engine as engine;

/// Common imports for typical packing runs.
///
/// ```rust
/// use pebble::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pebble_core::{MaterialId, MaterialWeights, Position};

    // Geometry
    pub use pebble_space::{
        Container, Cylinder, FlowDirection, SpaceError, UsableBounds, MAX_PACKING_FRACTION,
    };

    // Engine
    pub use pebble_engine::{
        pack, pack_with_observer, CellFloor, ConfigError, ConvergenceWarning, JodreyTory,
        PackConfig, PackError, PackReport, PackTarget, Packing, RelaxationConfig,
        RelaxationState, RoundObserver, RoundReport,
    };
}
