//! Packing configuration, validation, and error types.
//!
//! [`PackConfig`] is the caller-facing input to [`pack`](crate::pack()).
//! [`validate()`](PackConfig::validate) checks every invariant before any
//! random draw is made and resolves the request into a [`PackTarget`].

use std::error::Error;
use std::fmt;

use pebble_core::MaterialWeights;
use pebble_space::{n_to_pf, pf_to_n, Container, SpaceError, MAX_PACKING_FRACTION};

/// Tolerance on the sum of material weights.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ── CellFloor ──────────────────────────────────────────────────────

/// How the relaxation turns the separation estimate into a lattice cell size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellFloor {
    /// `max(delta, 2 · pebble_radius)`. Every overlapping pair shares a
    /// Moore neighbourhood, so an empty rod set really means no overlaps.
    #[default]
    PebbleDiameter,
    /// The raw estimate. Faster on dense packings; overlaps wider than a
    /// cell can go unseen.
    Unfloored,
}

// ── RelaxationConfig ───────────────────────────────────────────────

/// Tuning for the [`JodreyTory`](crate::JodreyTory) relaxation.
#[derive(Clone, Debug, PartialEq)]
pub struct RelaxationConfig {
    /// Contraction rate `k` in the per-round shrink of the outer diameter.
    /// Default: 1e-3.
    pub contraction_rate: f64,
    /// Hard cap on contraction steps. Default: 100 000 000.
    pub max_iterations: u64,
    /// Lattice cell sizing policy.
    pub cell_floor: CellFloor,
    /// Re-sample the separation estimate every round instead of once.
    pub reestimate_separation: bool,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            contraction_rate: 1e-3,
            max_iterations: 100_000_000,
            cell_floor: CellFloor::PebbleDiameter,
            reestimate_separation: false,
        }
    }
}

impl RelaxationConfig {
    /// Check the tuning parameters on their own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = self.contraction_rate;
        if !k.is_finite() || k <= 0.0 {
            return Err(ConfigError::InvalidContractionRate { value: k });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidIterationCap);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`PackConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Neither a pebble count nor a packing fraction was given.
    MissingTarget,
    /// Both a pebble count and a packing fraction were given.
    ConflictingTargets,
    /// A packing-fraction target needs material weights.
    MissingMaterialWeights,
    /// Material weights are empty, non-positive, or do not sum to one.
    InvalidMaterialWeights {
        /// Which invariant was violated.
        reason: String,
    },
    /// The packing fraction is NaN, infinite, zero, or negative.
    InvalidPackingFraction {
        /// The invalid value.
        value: f64,
    },
    /// The requested or implied packing fraction is above the ceiling.
    PackingFractionTooHigh {
        /// The offending fraction (requested, or computed from the count).
        fraction: f64,
        /// The pebble count, when the target was given as a count.
        count: Option<usize>,
        /// The ceiling.
        max: f64,
    },
    /// The target resolves to zero pebbles.
    NoPebbles,
    /// The pebble radius is NaN, infinite, zero, or negative.
    InvalidPebbleRadius {
        /// The invalid value.
        value: f64,
    },
    /// The contraction rate is NaN, infinite, zero, or negative.
    InvalidContractionRate {
        /// The invalid value.
        value: f64,
    },
    /// The iteration cap is zero.
    InvalidIterationCap,
    /// The container rejected the request.
    Geometry(SpaceError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget => {
                write!(f, "either a pebble count or a packing fraction is required")
            }
            Self::ConflictingTargets => {
                write!(f, "give a pebble count or a packing fraction, not both")
            }
            Self::MissingMaterialWeights => {
                write!(f, "a packing fraction target requires material weights")
            }
            Self::InvalidMaterialWeights { reason } => {
                write!(f, "invalid material weights: {reason}")
            }
            Self::InvalidPackingFraction { value } => {
                write!(f, "packing fraction must be finite and positive, got {value}")
            }
            Self::PackingFractionTooHigh {
                fraction,
                count: Some(n),
                max,
            } => write!(
                f,
                "{n} pebbles give packing fraction {fraction:.4}, above the maximum of {max}"
            ),
            Self::PackingFractionTooHigh {
                fraction,
                count: None,
                max,
            } => write!(f, "packing fraction {fraction} is above the maximum of {max}"),
            Self::NoPebbles => write!(f, "target resolves to zero pebbles"),
            Self::InvalidPebbleRadius { value } => {
                write!(f, "pebble radius must be finite and positive, got {value}")
            }
            Self::InvalidContractionRate { value } => {
                write!(f, "contraction rate must be finite and positive, got {value}")
            }
            Self::InvalidIterationCap => write!(f, "max_iterations must be at least 1"),
            Self::Geometry(e) => write!(f, "geometry: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Geometry(e)
    }
}

// ── PackTarget ─────────────────────────────────────────────────────

/// A validated packing request.
#[derive(Clone, Debug, PartialEq)]
pub enum PackTarget {
    /// The caller asked for an exact number of pebbles.
    Count {
        /// Pebbles to place.
        count: usize,
        /// Packing fraction those pebbles give in the container.
        equivalent_fraction: f64,
    },
    /// The caller asked for a packing fraction.
    PackingFraction {
        /// The requested fraction.
        requested: f64,
        /// Pebbles to place (floor of the equivalent count).
        count: usize,
        /// Material weights carried through unrealised.
        weights: MaterialWeights,
    },
}

impl PackTarget {
    /// Number of pebbles to place.
    pub fn count(&self) -> usize {
        match self {
            Self::Count { count, .. } | Self::PackingFraction { count, .. } => *count,
        }
    }

    /// The packing fraction the caller asked for, or the one implied by
    /// their count.
    pub fn packing_fraction(&self) -> f64 {
        match self {
            Self::Count {
                equivalent_fraction,
                ..
            } => *equivalent_fraction,
            Self::PackingFraction { requested, .. } => *requested,
        }
    }
}

// ── PackConfig ─────────────────────────────────────────────────────

/// Complete input for one packing run.
///
/// Exactly one of `count` and `packing_fraction` must be set; a fraction
/// also needs `material_weights`.
#[derive(Clone, Debug, PartialEq)]
pub struct PackConfig {
    /// Radius shared by every pebble.
    pub pebble_radius: f64,
    /// Exact number of pebbles to place.
    pub count: Option<usize>,
    /// Target packing fraction, in `(0, 0.60]`.
    pub packing_fraction: Option<f64>,
    /// Material id to weight; required with `packing_fraction`.
    pub material_weights: Option<MaterialWeights>,
    /// Relaxation tuning.
    pub relaxation: RelaxationConfig,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            pebble_radius: 1.0,
            count: None,
            packing_fraction: None,
            material_weights: None,
            relaxation: RelaxationConfig::default(),
        }
    }
}

impl PackConfig {
    /// Request exactly `count` pebbles of the given radius.
    pub fn with_count(pebble_radius: f64, count: usize) -> Self {
        Self {
            pebble_radius,
            count: Some(count),
            ..Self::default()
        }
    }

    /// Request a packing fraction with the given material weights.
    pub fn with_packing_fraction(
        pebble_radius: f64,
        packing_fraction: f64,
        material_weights: MaterialWeights,
    ) -> Self {
        Self {
            pebble_radius,
            packing_fraction: Some(packing_fraction),
            material_weights: Some(material_weights),
            ..Self::default()
        }
    }

    /// Set the contraction rate `k`.
    pub fn contraction_rate(mut self, k: f64) -> Self {
        self.relaxation.contraction_rate = k;
        self
    }

    /// Set the cap on contraction steps.
    pub fn max_iterations(mut self, cap: u64) -> Self {
        self.relaxation.max_iterations = cap;
        self
    }

    /// Set the lattice cell sizing policy.
    pub fn cell_floor(mut self, floor: CellFloor) -> Self {
        self.relaxation.cell_floor = floor;
        self
    }

    /// Re-estimate the minimum separation every round.
    pub fn reestimate_separation(mut self, on: bool) -> Self {
        self.relaxation.reestimate_separation = on;
        self
    }

    /// Validate against `container` and resolve the pebble count.
    ///
    /// Target-only checks come first, so an over-dense fraction is
    /// rejected regardless of the container. Logs the equivalent fraction
    /// or count at `info`.
    pub fn validate(&self, container: &Container) -> Result<PackTarget, ConfigError> {
        // 1. Exactly one target.
        let requested = match (self.count, self.packing_fraction) {
            (None, None) => return Err(ConfigError::MissingTarget),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingTargets),
            (Some(_), None) => None,
            (None, Some(pf)) => Some(pf),
        };
        // 2. Fraction targets: weights, range, ceiling.
        let weights = match requested {
            Some(pf) => {
                let weights = self
                    .material_weights
                    .as_ref()
                    .ok_or(ConfigError::MissingMaterialWeights)?;
                validate_weights(weights)?;
                if !pf.is_finite() || pf <= 0.0 {
                    return Err(ConfigError::InvalidPackingFraction { value: pf });
                }
                if pf > MAX_PACKING_FRACTION {
                    return Err(ConfigError::PackingFractionTooHigh {
                        fraction: pf,
                        count: None,
                        max: MAX_PACKING_FRACTION,
                    });
                }
                Some(weights.clone())
            }
            None => None,
        };
        // 3. Pebble radius.
        let r = self.pebble_radius;
        if !r.is_finite() || r <= 0.0 {
            return Err(ConfigError::InvalidPebbleRadius { value: r });
        }
        // 4. Geometry must be packable and the pebble must fit.
        container.as_cylinder()?;
        container.usable_bounds(r)?;
        // 5. Resolve the count.
        let target = match (requested, weights) {
            (Some(pf), Some(weights)) => {
                let count = pf_to_n(container, r, pf)?;
                if count == 0 {
                    return Err(ConfigError::NoPebbles);
                }
                log::info!("packing fraction {pf} is equivalent to {count} pebbles");
                PackTarget::PackingFraction {
                    requested: pf,
                    count,
                    weights,
                }
            }
            _ => {
                let count = self.count.unwrap_or(0);
                if count == 0 {
                    return Err(ConfigError::NoPebbles);
                }
                let fraction = n_to_pf(container, r, count)?;
                log::info!("{count} pebbles are equivalent to packing fraction {fraction:.6}");
                if fraction > MAX_PACKING_FRACTION {
                    return Err(ConfigError::PackingFractionTooHigh {
                        fraction,
                        count: Some(count),
                        max: MAX_PACKING_FRACTION,
                    });
                }
                PackTarget::Count {
                    count,
                    equivalent_fraction: fraction,
                }
            }
        };
        // 6. Relaxation tuning.
        self.relaxation.validate()?;
        Ok(target)
    }
}

fn validate_weights(weights: &MaterialWeights) -> Result<(), ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::InvalidMaterialWeights {
            reason: "no materials given".to_string(),
        });
    }
    for (id, &w) in weights {
        if !w.is_finite() || w <= 0.0 {
            return Err(ConfigError::InvalidMaterialWeights {
                reason: format!("weight for material {id} must be finite and positive, got {w}"),
            });
        }
    }
    let sum: f64 = weights.values().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::InvalidMaterialWeights {
            reason: format!("weights sum to {sum}, expected 1"),
        });
    }
    Ok(())
}
