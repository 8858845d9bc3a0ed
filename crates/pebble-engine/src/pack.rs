//! The public packing operation.

use std::error::Error;
use std::fmt;
use std::ops::ControlFlow;

use pebble_core::Position;
use pebble_space::{Container, SpaceError};
use rand::Rng;

use crate::config::{ConfigError, PackConfig, PackTarget};
use crate::metrics::RelaxationMetrics;
use crate::relax::{ConvergenceWarning, JodreyTory, RelaxationState, RoundObserver, RoundReport};
use crate::sampler::sample_positions;

// ── PackError ──────────────────────────────────────────────────────

/// Errors that stop [`pack()`] before it produces positions.
#[derive(Clone, Debug, PartialEq)]
pub enum PackError {
    /// The request was rejected during validation.
    Config(ConfigError),
    /// The container could not be packed (unsupported shape, or a pebble
    /// that does not fit).
    Space(SpaceError),
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl Error for PackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Space(e) => Some(e),
        }
    }
}

impl From<ConfigError> for PackError {
    /// Geometry failures found while validating are reported as
    /// [`PackError::Space`], the same as those found later.
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Geometry(space) => Self::Space(space),
            other => Self::Config(other),
        }
    }
}

impl From<SpaceError> for PackError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── Packing ────────────────────────────────────────────────────────

/// How a run went.
#[derive(Clone, Debug, PartialEq)]
pub struct PackReport {
    /// The validated request.
    pub target: PackTarget,
    /// Terminal relaxation state.
    pub state: RelaxationState,
    /// Contraction steps taken.
    pub iterations: u64,
    /// Final nominal outer diameter.
    pub d_out: f64,
    /// Worst overlap distance of the last round that saw one.
    pub d_in: Option<f64>,
    /// Packing fraction of the placed pebbles at their true radius.
    pub achieved_fraction: f64,
    /// Packing fraction at `d_in`, when the run saw any overlap.
    pub achievable_fraction: Option<f64>,
    /// Set when the run failed to converge.
    pub warning: Option<ConvergenceWarning>,
    /// Counters for the relaxation.
    pub metrics: RelaxationMetrics,
}

impl PackReport {
    /// Whether the run ended with no overlaps.
    pub fn converged(&self) -> bool {
        self.state == RelaxationState::Converged
    }
}

/// Pebble centres plus the report that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Packing {
    /// One centre per pebble.
    pub positions: Vec<Position>,
    /// Run summary.
    pub report: PackReport,
}

impl Packing {
    /// Take the centres, dropping the report.
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }
}

// ── pack ───────────────────────────────────────────────────────────

/// Place pebbles in `container` according to `config`.
///
/// Validates, scatters centres uniformly in radius, angle and height
/// inside the usable region, and relaxes them. A run that fails to
/// converge still returns positions; check
/// [`PackReport::warning`].
///
/// ```
/// use pebble_core::Position;
/// use pebble_engine::{pack, PackConfig};
/// use pebble_space::Cylinder;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let core = Cylinder::new(Position::origin(), 10.0, 20.0).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let packing = pack(&core.into(), &PackConfig::with_count(1.0, 50), &mut rng).unwrap();
/// assert_eq!(packing.positions.len(), 50);
/// assert!(packing.report.converged());
/// ```
pub fn pack<R: Rng + ?Sized>(
    container: &Container,
    config: &PackConfig,
    rng: &mut R,
) -> Result<Packing, PackError> {
    pack_with_observer(container, config, rng, &mut |_: &RoundReport| {
        ControlFlow::Continue(())
    })
}

/// [`pack()`] with a per-round checkpoint.
///
/// Breaking from `observer` ends the run with
/// [`RelaxationState::Cancelled`] and returns the positions as they are.
pub fn pack_with_observer<R, O>(
    container: &Container,
    config: &PackConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<Packing, PackError>
where
    R: Rng + ?Sized,
    O: RoundObserver + ?Sized,
{
    let target = config.validate(container)?;
    let n = target.count();
    let mut relax = JodreyTory::new(container, config.pebble_radius, n, config.relaxation.clone())?;
    let mut positions = sample_positions(relax.bounds(), n, rng);
    log::debug!(
        "sampled {n} pebbles, starting diameter {:.6}",
        relax.d_out0()
    );

    let state = relax.run_with_observer(&mut positions, rng, observer)?;
    let d_in = relax.d_in();
    let report = PackReport {
        state,
        iterations: relax.iterations(),
        d_out: relax.d_out(),
        d_in,
        achieved_fraction: relax.packing_fraction_at(2.0 * config.pebble_radius),
        achievable_fraction: d_in.map(|d| relax.packing_fraction_at(d)),
        warning: relax.warning(),
        metrics: relax.metrics().clone(),
        target,
    };
    log::info!(
        "packing {state} after {} rounds ({} iterations)",
        report.metrics.rounds,
        report.iterations
    );
    Ok(Packing { positions, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_space::{Annulus, Cylinder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn config_errors_pass_through() {
        let core: Container = Cylinder::new(Position::origin(), 10.0, 20.0).unwrap().into();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            pack(&core, &PackConfig::default(), &mut rng),
            Err(PackError::Config(ConfigError::MissingTarget))
        );
    }

    #[test]
    fn geometry_failures_surface_as_space_errors() {
        let annulus: Container = Annulus::new(Position::origin(), 1.0, 4.0, 5.0).unwrap().into();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            pack(&annulus, &PackConfig::with_count(0.5, 10), &mut rng),
            Err(PackError::Space(SpaceError::UnsupportedGeometry { kind: "annulus" }))
        );
    }

    #[test]
    fn error_source_chain() {
        let e: PackError = ConfigError::NoPebbles.into();
        assert!(e.to_string().starts_with("config:"));
        assert!(e.source().is_some());
    }

    #[test]
    fn report_fractions() {
        let core: Container = Cylinder::new(Position::origin(), 10.0, 20.0).unwrap().into();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let packing = pack(&core, &PackConfig::with_count(1.0, 50), &mut rng).unwrap();
        let report = &packing.report;
        assert!((report.achieved_fraction - 1.0 / 30.0).abs() < 1e-12);
        assert_eq!(report.target.count(), 50);
        if let (Some(d_in), Some(pf)) = (report.d_in, report.achievable_fraction) {
            assert!(d_in <= 2.0);
            assert!(pf <= report.achieved_fraction + 1e-12);
        }
        assert_eq!(packing.clone().into_positions(), packing.positions);
    }
}
