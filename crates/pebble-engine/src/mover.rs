//! Pair mover: push the two ends of a rod apart to a target separation.

use nalgebra::Vector3;
use pebble_core::{Position, RodKey};
use pebble_space::UsableBounds;

/// Move both ends of `rod` so they sit `d_out` apart, then clamp them back
/// into `bounds`.
///
/// With `u` the unit vector from `hi` to `lo`, `lo` moves by
/// `(d_out - length) / 2` along `u` and `hi` by the same amount along `-u`.
/// A centre pushed past the usable radius is re-projected onto the circle
/// of radius `r_max` at the planar angle of its own direction of travel;
/// the axial coordinate is clamped. That angle ignores where the centre
/// was, so a boundary pebble pushed along `+x` lands on `(r_max, 0)` and
/// boundary pebbles moving the same way collapse onto the same point.
/// Coincident centres (`length == 0`) are separated along `+x`.
///
/// Returns the number of coordinates that had to be clamped.
pub fn move_pair(
    positions: &mut [Position],
    rod: RodKey,
    length: f64,
    d_out: f64,
    bounds: &UsableBounds,
) -> u32 {
    let (i, j) = (rod.lo(), rod.hi());
    let u = if length > 0.0 {
        (positions[i] - positions[j]) / length
    } else {
        Vector3::x()
    };
    let step = 0.5 * (d_out - length);
    displace(&mut positions[i], u, step, bounds) + displace(&mut positions[j], -u, step, bounds)
}

fn displace(p: &mut Position, direction: Vector3<f64>, step: f64, bounds: &UsableBounds) -> u32 {
    *p += direction * step;
    let mut clamped = 0;
    if bounds.planar_distance(p) > bounds.r_max() {
        let theta = direction.y.atan2(direction.x);
        let (cx, cy) = bounds.centre();
        p.x = cx + bounds.r_max() * theta.cos();
        p.y = cy + bounds.r_max() * theta.sin();
        clamped += 1;
    }
    let z = bounds.clamp_axial(p.z);
    if z != p.z {
        p.z = z;
        clamped += 1;
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_core::distance;
    use proptest::prelude::*;

    fn roomy() -> UsableBounds {
        UsableBounds::new(1.0, 0.0, 0.0, 100.0, -100.0, 100.0).unwrap()
    }

    fn rod(a: usize, b: usize) -> RodKey {
        RodKey::new(a, b).unwrap()
    }

    #[test]
    fn separates_to_target_distance() {
        let mut p = vec![Position::new(0.0, 0.0, 0.0), Position::new(1.0, 0.0, 0.0)];
        let clamped = move_pair(&mut p, rod(0, 1), 1.0, 3.0, &roomy());
        assert_eq!(clamped, 0);
        assert!((distance(&p[0], &p[1]) - 3.0).abs() < 1e-12);
        assert!((p[0].x + 1.0).abs() < 1e-12);
        assert!((p[1].x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_is_preserved_without_clamping() {
        let mut p = vec![Position::new(1.0, 2.0, 3.0), Position::new(2.0, 1.0, 2.5)];
        let mid = nalgebra::center(&p[0], &p[1]);
        let len = distance(&p[0], &p[1]);
        move_pair(&mut p, rod(0, 1), len, 4.0, &roomy());
        let after = nalgebra::center(&p[0], &p[1]);
        assert!((mid - after).norm() < 1e-12);
    }

    #[test]
    fn coincident_centres_split_along_x() {
        let mut p = vec![Position::new(0.0, 0.0, 0.0), Position::new(0.0, 0.0, 0.0)];
        move_pair(&mut p, rod(0, 1), 0.0, 2.0, &roomy());
        assert_eq!(p[0], Position::new(1.0, 0.0, 0.0));
        assert_eq!(p[1], Position::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn radial_overshoot_is_reprojected_along_travel_direction() {
        let b = UsableBounds::new(1.0, 0.0, 0.0, 2.0, -5.0, 5.0).unwrap();
        let mut p = vec![Position::new(1.5, 0.0, 0.0), Position::new(0.5, 0.0, 0.0)];
        let clamped = move_pair(&mut p, rod(0, 1), 1.0, 3.0, &b);
        // 0 travels along +x to 2.5 and is pulled back to r_max; 1 stays inside.
        assert_eq!(clamped, 1);
        assert!((p[0].x - 2.0).abs() < 1e-12 && p[0].y.abs() < 1e-12);
        assert!((p[1].x + 0.5).abs() < 1e-12);
    }

    #[test]
    fn tangential_push_at_the_wall_lands_on_the_travel_angle() {
        let b = UsableBounds::new(1.0, 0.0, 0.0, 2.0, -5.0, 5.0).unwrap();
        let mut p = vec![
            Position::new(0.0, 2.0, 0.0),
            Position::new(-1.0, 2.0, 0.0),
            Position::new(0.0, -2.0, 0.0),
            Position::new(-1.0, -2.0, 0.0),
        ];
        move_pair(&mut p, rod(0, 1), 1.0, 3.0, &b);
        move_pair(&mut p, rod(2, 3), 1.0, 3.0, &b);
        // Both leading pebbles travelled along +x, so both sit at (r_max, 0).
        for lead in [p[0], p[2]] {
            assert!((lead.x - 2.0).abs() < 1e-12 && lead.y.abs() < 1e-12, "{lead:?}");
        }
        assert!(distance(&p[0], &p[2]) < 1e-12);
    }

    #[test]
    fn axial_overshoot_is_clamped() {
        let b = UsableBounds::new(1.0, 0.0, 0.0, 10.0, -1.0, 1.0).unwrap();
        let mut p = vec![Position::new(0.0, 0.0, 0.5), Position::new(0.0, 0.0, -0.5)];
        let clamped = move_pair(&mut p, rod(0, 1), 1.0, 5.0, &b);
        assert_eq!(clamped, 2);
        assert_eq!(p[0].z, 1.0);
        assert_eq!(p[1].z, -1.0);
    }

    proptest! {
        #[test]
        fn moved_centres_stay_in_bounds(
            ax in -3.0f64..3.0, ay in -3.0f64..3.0, az in -2.0f64..2.0,
            bx in -3.0f64..3.0, by in -3.0f64..3.0, bz in -2.0f64..2.0,
            d_out in 0.0f64..10.0,
        ) {
            let b = UsableBounds::new(1.0, 0.5, -0.5, 3.0, -2.0, 2.0).unwrap();
            let mut p = vec![Position::new(ax, ay, az), Position::new(bx, by, bz)];
            let len = distance(&p[0], &p[1]);
            move_pair(&mut p, rod(0, 1), len, d_out, &b);
            prop_assert!(b.contains(&p[0]), "{:?}", p[0]);
            prop_assert!(b.contains(&p[1]), "{:?}", p[1]);
        }
    }
}
