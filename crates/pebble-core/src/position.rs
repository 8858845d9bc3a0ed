//! Pebble centre positions.

/// Centre of a single pebble in container coordinates.
///
/// The container axis is parallel to `z`; `x` and `y` span the planar
/// cross-section.
pub type Position = nalgebra::Point3<f64>;

/// Euclidean distance between two pebble centres.
pub fn distance(a: &Position, b: &Position) -> f64 {
    nalgebra::distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((distance(&a, &b) - 13.0).abs() < 1e-12);
        assert!((distance(&b, &a) - 13.0).abs() < 1e-12);
    }
}
