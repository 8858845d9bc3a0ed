//! Container geometry and spatial indexing for pebble packing.
//!
//! This crate answers every geometric question the packing engine asks:
//! where pebbles may live ([`Container`], [`UsableBounds`]), how packing
//! fraction relates to pebble count ([`conversion`]), and which pebbles
//! currently overlap ([`Lattice`], [`detect_rods`]).
//!
//! # Containers
//!
//! - [`Cylinder`]: right circular cylinder with its axis parallel to `z`.
//!   The only shape the packing engine accepts.
//! - [`Annulus`]: annular core descriptor, carried for downstream tooling.
//!   Every packing query on it fails with [`SpaceError::UnsupportedGeometry`].
//!
//! # Overlap detection
//!
//! Pebble centres are bucketed into a cubic [`Lattice`]; [`detect_rods`]
//! searches each occupied cell's Moore neighbourhood for pairs closer than
//! one pebble diameter and reduces them to the worst overlap per pebble.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod container;
pub mod conversion;
pub mod error;
pub mod lattice;
pub mod rods;

pub use bounds::{BoundingBox, UsableBounds};
pub use container::{Annulus, Container, Cylinder, FlowDirection};
pub use conversion::{
    equivalent_diameter, n_to_pf, packing_fraction_for_diameter, pebble_volume, pf_to_n,
    MAX_PACKING_FRACTION,
};
pub use error::SpaceError;
pub use lattice::{CellKey, Lattice};
pub use rods::{candidate_pairs, detect_rods, reduce_to_worst_per_point};
