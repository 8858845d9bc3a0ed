//! Criterion micro-benchmarks for lattice construction and rod detection.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pebble_bench::{dense_profile, initial_positions, reference_profile};
use pebble_engine::estimate_separation;
use pebble_space::{candidate_pairs, detect_rods, Lattice};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark: build a diameter-sized lattice over the dense profile's start.
fn bench_lattice_build_dense(c: &mut Criterion) {
    let (core, config) = dense_profile();
    let positions = initial_positions(&core, &config, 42).unwrap();
    let bbox = core.bounding_box().unwrap();

    c.bench_function("lattice_build_dense", |b| {
        b.iter(|| {
            let lattice = Lattice::build(&bbox, &positions, 2.0).unwrap();
            black_box(lattice.occupied_count());
        });
    });
}

/// Benchmark: candidate pair enumeration without distance filtering.
fn bench_candidate_pairs_dense(c: &mut Criterion) {
    let (core, config) = dense_profile();
    let positions = initial_positions(&core, &config, 42).unwrap();
    let lattice = Lattice::build(&core.bounding_box().unwrap(), &positions, 2.0).unwrap();

    c.bench_function("candidate_pairs_dense", |b| {
        b.iter(|| black_box(candidate_pairs(&lattice).len()));
    });
}

/// Benchmark: full rod detection including per-pebble reduction.
fn bench_detect_rods(c: &mut Criterion) {
    for (name, (core, config)) in [
        ("detect_rods_reference", reference_profile()),
        ("detect_rods_dense", dense_profile()),
    ] {
        let positions = initial_positions(&core, &config, 42).unwrap();
        let lattice = Lattice::build(&core.bounding_box().unwrap(), &positions, 2.0).unwrap();
        c.bench_function(name, |b| {
            b.iter(|| black_box(detect_rods(&lattice, &positions, config.pebble_radius)));
        });
    }
}

/// Benchmark: the n-pair separation estimate.
fn bench_estimate_separation(c: &mut Criterion) {
    let (core, config) = dense_profile();
    let positions = initial_positions(&core, &config, 42).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("estimate_separation_dense", |b| {
        b.iter(|| black_box(estimate_separation(&positions, &mut rng)));
    });
}

criterion_group!(
    benches,
    bench_lattice_build_dense,
    bench_candidate_pairs_dense,
    bench_detect_rods,
    bench_estimate_separation
);
criterion_main!(benches);
