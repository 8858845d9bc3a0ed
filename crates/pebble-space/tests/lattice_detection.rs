use nalgebra::Vector3;
use pebble_core::{distance, Position, RodKey};
use pebble_space::{candidate_pairs, detect_rods, BoundingBox, CellKey, Lattice};
use pebble_test_utils::{random_box_positions, seeded_rng};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn cube(side: f64) -> BoundingBox {
    BoundingBox {
        min: Position::origin(),
        extent: Vector3::new(side, side, side),
    }
}

fn scatter(seed: u64, n: usize, side: f64) -> Vec<Position> {
    random_box_positions(&mut seeded_rng(seed), n, side)
}

fn moore_adjacent(a: &CellKey, b: &CellKey) -> bool {
    (a.ix - b.ix).abs() <= 1 && (a.iy - b.iy).abs() <= 1 && (a.iz - b.iz).abs() <= 1
}

/// Pair set defined directly: `a` and `b` are candidates when some occupied
/// cell has both of their cells in its Moore neighbourhood.
fn oracle_pairs(lattice: &Lattice, positions: &[Position]) -> BTreeSet<RodKey> {
    let cells: Vec<_> = positions.iter().map(|p| lattice.cell_of(p)).collect();
    let occupied: Vec<_> = lattice.cells().map(|(k, _)| *k).collect();
    let mut out = BTreeSet::new();
    for a in 0..positions.len() {
        for b in (a + 1)..positions.len() {
            let shared = occupied
                .iter()
                .any(|c| moore_adjacent(c, &cells[a]) && moore_adjacent(c, &cells[b]));
            if shared {
                out.insert(RodKey::new(a, b).unwrap());
            }
        }
    }
    out
}

#[test]
fn candidate_pairs_match_the_neighbourhood_definition() {
    let positions = scatter(7, 120, 10.0);
    let lattice = Lattice::build(&cube(10.0), &positions, 1.3).unwrap();
    assert_eq!(candidate_pairs(&lattice), oracle_pairs(&lattice, &positions));
}

#[test]
fn cell_at_least_one_diameter_finds_every_overlap() {
    let positions = scatter(11, 300, 10.0);
    let radius = 0.4;
    let lattice = Lattice::build(&cube(10.0), &positions, 2.0 * radius).unwrap();
    let candidates = candidate_pairs(&lattice);
    for a in 0..positions.len() {
        for b in (a + 1)..positions.len() {
            if distance(&positions[a], &positions[b]) <= 2.0 * radius {
                assert!(
                    candidates.contains(&RodKey::new(a, b).unwrap()),
                    "overlap ({a}, {b}) missed"
                );
            }
        }
    }
    let rods = detect_rods(&lattice, &positions, radius);
    assert!(!rods.is_empty());
    for (key, len) in &rods {
        assert!(*len <= 2.0 * radius);
        let actual = distance(&positions[key.lo()], &positions[key.hi()]);
        assert!((actual - len).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn candidate_pairs_ignore_cell_enumeration_order(
        seed in 0u64..10_000,
        n in 2usize..60,
        cell in 0.5f64..3.0,
        rotate in 0usize..60,
    ) {
        // Rotating the position list changes which cell is occupied first,
        // and so the lattice's enumeration order, but not the geometry.
        let positions = scatter(seed, n, 8.0);
        let shift = rotate % n;
        let mut rotated = positions.clone();
        rotated.rotate_left(shift);
        let back = |i: usize| (i + shift) % n;

        let original = candidate_pairs(&Lattice::build(&cube(8.0), &positions, cell).unwrap());
        let permuted: BTreeSet<RodKey> =
            candidate_pairs(&Lattice::build(&cube(8.0), &rotated, cell).unwrap())
                .into_iter()
                .map(|k| RodKey::new(back(k.lo()), back(k.hi())).unwrap())
                .collect();
        prop_assert_eq!(original, permuted);
    }
}
