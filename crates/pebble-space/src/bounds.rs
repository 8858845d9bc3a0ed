//! Usable region and lattice extent queries.

use crate::error::SpaceError;
use nalgebra::Vector3;
use pebble_core::Position;

/// Relative slack allowed by [`UsableBounds::contains`] for rounding in
/// the trigonometric boundary re-projection.
const CONTAINS_TOLERANCE: f64 = 1e-9;

/// Region of a cylinder available to pebble centres.
///
/// A centre `p` is usable when its planar distance from the axis is at most
/// `r_max` and `z_low <= p.z <= z_up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsableBounds {
    centre_x: f64,
    centre_y: f64,
    r_max: f64,
    z_low: f64,
    z_up: f64,
}

impl UsableBounds {
    /// Build bounds, rejecting a region that has collapsed.
    ///
    /// Returns `Err(SpaceError::PebbleDoesNotFit)` when `r_max <= 0` or
    /// `z_low > z_up`.
    pub fn new(
        pebble_radius: f64,
        centre_x: f64,
        centre_y: f64,
        r_max: f64,
        z_low: f64,
        z_up: f64,
    ) -> Result<Self, SpaceError> {
        if r_max.is_nan() || r_max <= 0.0 {
            return Err(SpaceError::PebbleDoesNotFit {
                pebble_radius,
                reason: format!("usable radius {r_max} is not positive"),
            });
        }
        if z_low.is_nan() || z_up.is_nan() || z_low > z_up {
            return Err(SpaceError::PebbleDoesNotFit {
                pebble_radius,
                reason: format!("axial bounds [{z_low}, {z_up}] are empty"),
            });
        }
        Ok(Self {
            centre_x,
            centre_y,
            r_max,
            z_low,
            z_up,
        })
    }

    /// Planar coordinates of the container axis.
    pub fn centre(&self) -> (f64, f64) {
        (self.centre_x, self.centre_y)
    }

    /// Largest planar distance a centre may have from the axis.
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Lowest usable axial coordinate.
    pub fn z_low(&self) -> f64 {
        self.z_low
    }

    /// Highest usable axial coordinate.
    pub fn z_up(&self) -> f64 {
        self.z_up
    }

    /// Planar distance of `p` from the container axis.
    pub fn planar_distance(&self, p: &Position) -> f64 {
        (p.x - self.centre_x).hypot(p.y - self.centre_y)
    }

    /// Clamp an axial coordinate into `[z_low, z_up]`.
    pub fn clamp_axial(&self, z: f64) -> f64 {
        z.clamp(self.z_low, self.z_up)
    }

    /// Whether `p` lies inside the usable region, up to rounding.
    pub fn contains(&self, p: &Position) -> bool {
        let scale = self.r_max.max(self.z_up.abs()).max(self.z_low.abs()).max(1.0);
        let slack = CONTAINS_TOLERANCE * scale;
        self.planar_distance(p) <= self.r_max + slack
            && p.z >= self.z_low - slack
            && p.z <= self.z_up + slack
    }
}

/// Axis-aligned box a [`Lattice`](crate::Lattice) is laid over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Position,
    /// Edge lengths along `x`, `y`, `z`.
    pub extent: Vector3<f64>,
}
