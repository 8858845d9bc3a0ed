//! Packing engine: random placement plus Jodrey-Tory relaxation.
//!
//! [`pack()`] is the entry point. It validates a [`PackConfig`] against a
//! container, scatters pebble centres with the [`sampler`], and hands them
//! to the [`JodreyTory`] relaxation, which alternates overlap detection and
//! pair separation while shrinking the nominal outer diameter until no
//! overlaps remain or the run gives up.
//!
//! All randomness flows through an explicitly passed [`rand::Rng`]; seed a
//! `rand_chacha::ChaCha8Rng` for reproducible packings.
//!
//! Convergence problems are not errors: the engine returns its best-effort
//! positions with a [`ConvergenceWarning`] in the [`PackReport`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod mover;
pub mod pack;
pub mod relax;
pub mod sampler;
pub mod separation;

pub use config::{CellFloor, ConfigError, PackConfig, PackTarget, RelaxationConfig};
pub use metrics::RelaxationMetrics;
pub use mover::move_pair;
pub use pack::{pack, pack_with_observer, PackError, PackReport, Packing};
pub use relax::{ConvergenceWarning, JodreyTory, RelaxationState, RoundObserver, RoundReport};
pub use sampler::sample_positions;
pub use separation::estimate_separation;
