//! Test fixtures for pebble packing development.
//!
//! Reference containers, seeded RNGs, and brute-force oracles that the
//! lattice-based detector and the relaxation are checked against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    brute_force_overlaps, out_of_bounds, random_box_positions, reference_cylinder, seeded_rng,
    small_cylinder,
};
