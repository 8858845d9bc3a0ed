//! Error types for geometry and lattice operations.

use std::fmt;

/// Errors arising from container construction, bounds queries, or lattice builds.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// The container shape is not supported by the packing engine.
    UnsupportedGeometry {
        /// Short name of the rejected shape.
        kind: &'static str,
    },
    /// A container dimension is NaN, infinite, or out of range.
    InvalidDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The pebble is too large to fit inside the usable region.
    PebbleDoesNotFit {
        /// Pebble radius that was requested.
        pebble_radius: f64,
        /// Which bound collapsed.
        reason: String,
    },
    /// Lattice cell size is zero, negative, NaN, or infinite.
    InvalidCellSize {
        /// The offending cell size.
        value: f64,
    },
    /// A lattice axis would need more cells than an `i32` index can address.
    DimensionTooLarge {
        /// Axis name (`"x"`, `"y"` or `"z"`).
        axis: &'static str,
        /// Requested cell count along that axis.
        value: f64,
        /// Maximum permitted cell count.
        max: u64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedGeometry { kind } => {
                write!(f, "unsupported container geometry '{kind}': only cylinders can be packed")
            }
            Self::InvalidDimension { name, value } => {
                write!(f, "invalid container dimension {name} = {value}")
            }
            Self::PebbleDoesNotFit {
                pebble_radius,
                reason,
            } => {
                write!(f, "pebble radius {pebble_radius} does not fit: {reason}")
            }
            Self::InvalidCellSize { value } => {
                write!(f, "lattice cell size must be finite and positive, got {value}")
            }
            Self::DimensionTooLarge { axis, value, max } => {
                write!(f, "lattice axis {axis} needs {value} cells, maximum is {max}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
