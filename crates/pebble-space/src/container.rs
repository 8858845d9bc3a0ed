//! Container shapes that pebbles are packed into.
//!
//! [`Container`] is a closed set of shape descriptors. Only
//! [`Container::Cylinder`] can be packed; every bounds or volume-ratio query
//! against another variant fails a single explicit check
//! ([`Container::as_cylinder`]) with [`SpaceError::UnsupportedGeometry`].

use crate::bounds::{BoundingBox, UsableBounds};
use crate::error::SpaceError;
use nalgebra::Vector3;
use pebble_core::Position;
use std::f64::consts::PI;

/// Direction of coolant (and pebble) flow along the container axis.
///
/// Irrelevant to packing; carried so that downstream transport models
/// know which end pebbles enter from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// Pebbles travel from the top cap towards the bottom cap.
    #[default]
    Downward,
    /// Pebbles travel from the bottom cap towards the top cap.
    Upward,
}

fn check_positive(name: &'static str, value: f64) -> Result<f64, SpaceError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SpaceError::InvalidDimension { name, value })
    }
}

fn check_origin(origin: &Position) -> Result<(), SpaceError> {
    for (name, value) in [("origin.x", origin.x), ("origin.y", origin.y), ("origin.z", origin.z)] {
        if !value.is_finite() {
            return Err(SpaceError::InvalidDimension { name, value });
        }
    }
    Ok(())
}

/// A right circular cylinder with its axis parallel to `z`.
///
/// `origin` is the centroid: the axis passes through `(origin.x, origin.y)`
/// and the caps sit at `origin.z ± height / 2`. The boundary `buffer` is an
/// extra clearance kept between every pebble surface and the walls.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    origin: Position,
    radius: f64,
    height: f64,
    buffer: f64,
    flow: FlowDirection,
}

impl Cylinder {
    /// Create a cylinder with zero buffer and downward flow.
    ///
    /// Returns `Err(SpaceError::InvalidDimension)` if `radius` or `height`
    /// is not finite and positive, or the origin is not finite.
    pub fn new(origin: Position, radius: f64, height: f64) -> Result<Self, SpaceError> {
        check_origin(&origin)?;
        Ok(Self {
            origin,
            radius: check_positive("radius", radius)?,
            height: check_positive("height", height)?,
            buffer: 0.0,
            flow: FlowDirection::default(),
        })
    }

    /// Set the wall clearance. Must be finite and `>= 0`.
    pub fn with_buffer(mut self, buffer: f64) -> Result<Self, SpaceError> {
        if !buffer.is_finite() || buffer < 0.0 {
            return Err(SpaceError::InvalidDimension {
                name: "buffer",
                value: buffer,
            });
        }
        self.buffer = buffer;
        Ok(self)
    }

    /// Set the flow orientation.
    pub fn with_flow(mut self, flow: FlowDirection) -> Self {
        self.flow = flow;
        self
    }

    /// Centroid of the cylinder.
    pub fn origin(&self) -> &Position {
        &self.origin
    }

    /// Cylinder radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Cylinder height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Wall clearance.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Flow orientation.
    pub fn flow(&self) -> FlowDirection {
        self.flow
    }

    /// Full interior volume `π r² h`.
    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.height
    }

    /// Region available to pebble centres of the given radius.
    ///
    /// Each bound is inset by `pebble_radius + buffer` from the walls.
    pub fn usable_bounds(&self, pebble_radius: f64) -> Result<UsableBounds, SpaceError> {
        let inset = pebble_radius + self.buffer;
        UsableBounds::new(
            pebble_radius,
            self.origin.x,
            self.origin.y,
            self.radius - inset,
            self.origin.z - 0.5 * self.height + inset,
            self.origin.z + 0.5 * self.height - inset,
        )
    }

    /// Axis-aligned box enclosing the cylinder.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min: Position::new(
                self.origin.x - self.radius,
                self.origin.y - self.radius,
                self.origin.z - 0.5 * self.height,
            ),
            extent: Vector3::new(2.0 * self.radius, 2.0 * self.radius, self.height),
        }
    }
}

/// An annular core: the region between two coaxial cylinders.
///
/// Common in pebble-bed designs with a central graphite reflector column.
/// Described here so callers can hold one [`Container`] type; packing an
/// annulus is not supported.
#[derive(Clone, Debug, PartialEq)]
pub struct Annulus {
    origin: Position,
    inner_radius: f64,
    outer_radius: f64,
    height: f64,
    flow: FlowDirection,
}

impl Annulus {
    /// Create an annulus. Requires `0 < inner_radius < outer_radius`.
    pub fn new(
        origin: Position,
        inner_radius: f64,
        outer_radius: f64,
        height: f64,
    ) -> Result<Self, SpaceError> {
        check_origin(&origin)?;
        let inner_radius = check_positive("inner_radius", inner_radius)?;
        let outer_radius = check_positive("outer_radius", outer_radius)?;
        if inner_radius >= outer_radius {
            return Err(SpaceError::InvalidDimension {
                name: "inner_radius",
                value: inner_radius,
            });
        }
        Ok(Self {
            origin,
            inner_radius,
            outer_radius,
            height: check_positive("height", height)?,
            flow: FlowDirection::default(),
        })
    }

    /// Set the flow orientation.
    pub fn with_flow(mut self, flow: FlowDirection) -> Self {
        self.flow = flow;
        self
    }

    /// Inner (reflector) radius.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer (vessel) radius.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Height along the axis.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Interior volume `π (R² - r²) h`.
    pub fn volume(&self) -> f64 {
        PI * (self.outer_radius.powi(2) - self.inner_radius.powi(2)) * self.height
    }
}

/// A container descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Container {
    /// Right circular cylinder; the supported packing shape.
    Cylinder(Cylinder),
    /// Annular core; described but not packable.
    Annulus(Annulus),
}

impl Container {
    /// Short shape name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cylinder(_) => "cylinder",
            Self::Annulus(_) => "annulus",
        }
    }

    /// Centroid of the container.
    pub fn origin(&self) -> &Position {
        match self {
            Self::Cylinder(c) => &c.origin,
            Self::Annulus(a) => &a.origin,
        }
    }

    /// Flow orientation.
    pub fn flow(&self) -> FlowDirection {
        match self {
            Self::Cylinder(c) => c.flow,
            Self::Annulus(a) => a.flow,
        }
    }

    /// Narrow to the packable cylinder, or fail with `UnsupportedGeometry`.
    pub fn as_cylinder(&self) -> Result<&Cylinder, SpaceError> {
        match self {
            Self::Cylinder(c) => Ok(c),
            other => Err(SpaceError::UnsupportedGeometry { kind: other.kind() }),
        }
    }

    /// Interior volume of a packable container.
    pub fn volume(&self) -> Result<f64, SpaceError> {
        Ok(self.as_cylinder()?.volume())
    }

    /// Region available to pebble centres of the given radius.
    pub fn usable_bounds(&self, pebble_radius: f64) -> Result<UsableBounds, SpaceError> {
        self.as_cylinder()?.usable_bounds(pebble_radius)
    }

    /// Axis-aligned box the spatial lattice is laid over.
    pub fn bounding_box(&self) -> Result<BoundingBox, SpaceError> {
        Ok(self.as_cylinder()?.bounding_box())
    }
}

impl From<Cylinder> for Container {
    fn from(c: Cylinder) -> Self {
        Self::Cylinder(c)
    }
}

impl From<Annulus> for Container {
    fn from(a: Annulus) -> Self {
        Self::Annulus(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cylinder() -> Cylinder {
        Cylinder::new(Position::origin(), 10.0, 20.0).unwrap()
    }

    #[test]
    fn cylinder_rejects_bad_dimensions() {
        assert!(matches!(
            Cylinder::new(Position::origin(), 0.0, 1.0),
            Err(SpaceError::InvalidDimension { name: "radius", .. })
        ));
        assert!(matches!(
            Cylinder::new(Position::origin(), 1.0, f64::NAN),
            Err(SpaceError::InvalidDimension { name: "height", .. })
        ));
        assert!(matches!(
            Cylinder::new(Position::new(f64::INFINITY, 0.0, 0.0), 1.0, 1.0),
            Err(SpaceError::InvalidDimension { name: "origin.x", .. })
        ));
        assert!(matches!(
            unit_cylinder().with_buffer(-0.1),
            Err(SpaceError::InvalidDimension { name: "buffer", .. })
        ));
    }

    #[test]
    fn cylinder_volume() {
        let c = unit_cylinder();
        assert!((c.volume() - PI * 100.0 * 20.0).abs() < 1e-9);
    }

    #[test]
    fn usable_bounds_are_inset_by_radius_and_buffer() {
        let c = Cylinder::new(Position::new(1.0, -2.0, 5.0), 10.0, 20.0)
            .unwrap()
            .with_buffer(0.5)
            .unwrap();
        let b = c.usable_bounds(1.0).unwrap();
        assert!((b.r_max() - 8.5).abs() < 1e-12);
        assert!((b.z_low() - (5.0 - 10.0 + 1.5)).abs() < 1e-12);
        assert!((b.z_up() - (5.0 + 10.0 - 1.5)).abs() < 1e-12);
        assert_eq!(b.centre(), (1.0, -2.0));
    }

    #[test]
    fn bounding_box_encloses_cylinder() {
        let c = Cylinder::new(Position::new(1.0, 2.0, 3.0), 4.0, 6.0).unwrap();
        let bb = c.bounding_box();
        assert_eq!(bb.min, Position::new(-3.0, -2.0, 0.0));
        assert_eq!(bb.extent, Vector3::new(8.0, 8.0, 6.0));
    }

    #[test]
    fn annulus_is_rejected_by_every_packing_query() {
        let a = Annulus::new(Position::origin(), 2.0, 5.0, 10.0).unwrap();
        assert!(a.volume() > 0.0);
        let container = Container::from(a);
        let unsupported = SpaceError::UnsupportedGeometry { kind: "annulus" };
        assert_eq!(container.as_cylinder().unwrap_err(), unsupported);
        assert_eq!(container.volume().unwrap_err(), unsupported);
        assert_eq!(container.usable_bounds(0.5).unwrap_err(), unsupported);
        assert_eq!(container.bounding_box().unwrap_err(), unsupported);
    }

    #[test]
    fn annulus_requires_inner_below_outer() {
        assert!(matches!(
            Annulus::new(Position::origin(), 5.0, 5.0, 1.0),
            Err(SpaceError::InvalidDimension { name: "inner_radius", .. })
        ));
    }

    #[test]
    fn flow_is_carried() {
        let c: Container = unit_cylinder().with_flow(FlowDirection::Upward).into();
        assert_eq!(c.flow(), FlowDirection::Upward);
        assert_eq!(c.kind(), "cylinder");
        assert_eq!(*c.origin(), Position::origin());
    }
}
