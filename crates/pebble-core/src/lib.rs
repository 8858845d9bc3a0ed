//! Core types for the pebble packing workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the geometry, lattice and relaxation crates:
//! pebble positions, rods (overlap constraints), and material identifiers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod position;
pub mod rod;

pub use id::{MaterialId, MaterialWeights};
pub use position::{distance, Position};
pub use rod::{min_rod_length, RodKey, RodSet};
