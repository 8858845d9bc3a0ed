//! Jodrey-Tory relaxation.
//!
//! Each round builds a lattice over the current centres, detects rods,
//! pushes every rod's ends apart to the nominal outer diameter `d_out`, and
//! then shrinks `d_out` by
//!
//! ```text
//! 0.5^j · (k / n) · d_out0,    j = floor(-log10 |pf(d_out) - pf(d_in)|)
//! ```
//!
//! where `d_in` is the shortest rod of the round. The shrink slows as the
//! nominal and actual fractions approach each other. The run ends when a
//! round finds no rods (`Converged`), when `d_out` falls below `d_in`
//! (`FailedSlowConvergence`), when the iteration cap is exceeded
//! (`FailedIterationLimit`), or when an observer asks it to stop
//! (`Cancelled`).
//!
//! # State machine
//!
//! ```text
//! Initial ──step──► Iterating ──step──► Iterating ...
//!                        │
//!                        ├──► Converged
//!                        ├──► FailedSlowConvergence
//!                        ├──► FailedIterationLimit
//!                        └──► Cancelled   (observer break)
//! ```
//!
//! Terminal states are sticky: further `step()` calls are no-ops.

use std::fmt;
use std::ops::ControlFlow;
use std::time::Instant;

use pebble_core::{min_rod_length, Position};
use pebble_space::{
    detect_rods, equivalent_diameter, packing_fraction_for_diameter, BoundingBox, Container,
    Lattice, SpaceError, UsableBounds,
};
use rand::Rng;

use crate::config::{CellFloor, RelaxationConfig};
use crate::metrics::RelaxationMetrics;
use crate::mover::move_pair;
use crate::separation::estimate_separation;

/// Exponent used when the packing-fraction gap is exactly zero.
const SATURATED_EXPONENT: i32 = 64;

// ── RelaxationState ────────────────────────────────────────────────

/// Where a [`JodreyTory`] run is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelaxationState {
    /// Constructed, no round run yet.
    Initial,
    /// At least one round run, not finished.
    Iterating,
    /// A round detected no overlaps.
    Converged,
    /// The nominal diameter fell below the worst overlap.
    FailedSlowConvergence,
    /// The contraction step count exceeded the cap.
    FailedIterationLimit,
    /// A [`RoundObserver`] stopped the run.
    Cancelled,
}

impl RelaxationState {
    /// Whether the run is finished.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Initial | Self::Iterating)
    }
}

impl fmt::Display for RelaxationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::Iterating => "iterating",
            Self::Converged => "converged",
            Self::FailedSlowConvergence => "failed (slow convergence)",
            Self::FailedIterationLimit => "failed (iteration limit)",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// ── ConvergenceWarning ─────────────────────────────────────────────

/// Non-fatal outcome of a failed run.
///
/// The positions are still returned; this records how far the packing
/// actually got.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvergenceWarning {
    /// The nominal diameter shrank past the worst overlap.
    SlowConvergence {
        /// Worst overlap distance in the final round.
        achievable_diameter: f64,
        /// Packing fraction at that diameter.
        achievable_fraction: f64,
    },
    /// The iteration cap was exceeded.
    IterationLimit {
        /// Contraction steps taken.
        iterations: u64,
        /// Worst overlap distance in the final round.
        achievable_diameter: f64,
        /// Packing fraction at that diameter.
        achievable_fraction: f64,
    },
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlowConvergence {
                achievable_diameter,
                achievable_fraction,
            } => write!(
                f,
                "relaxation converging too slowly; achievable diameter {achievable_diameter:.6} \
                 (packing fraction {achievable_fraction:.6})"
            ),
            Self::IterationLimit {
                iterations,
                achievable_diameter,
                achievable_fraction,
            } => write!(
                f,
                "relaxation stopped after {iterations} iterations; achievable diameter \
                 {achievable_diameter:.6} (packing fraction {achievable_fraction:.6})"
            ),
        }
    }
}

// ── Observer ───────────────────────────────────────────────────────

/// Summary of one completed round, handed to a [`RoundObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundReport {
    /// 1-based round index.
    pub round: u64,
    /// State after the round.
    pub state: RelaxationState,
    /// Rods moved this round.
    pub rods: usize,
    /// Shortest rod this round, if any.
    pub d_in: Option<f64>,
    /// Nominal outer diameter after the round's contraction.
    pub d_out: f64,
    /// Lattice cell size used.
    pub cell_size: f64,
}

/// Per-round checkpoint for long runs.
///
/// Returning [`ControlFlow::Break`] stops the run with
/// [`RelaxationState::Cancelled`]. Implemented for any
/// `FnMut(&RoundReport) -> ControlFlow<()>`.
pub trait RoundObserver {
    /// Called after every round that left the run unfinished.
    fn on_round(&mut self, report: &RoundReport) -> ControlFlow<()>;
}

impl<F> RoundObserver for F
where
    F: FnMut(&RoundReport) -> ControlFlow<()>,
{
    fn on_round(&mut self, report: &RoundReport) -> ControlFlow<()> {
        self(report)
    }
}

// ── JodreyTory ─────────────────────────────────────────────────────

/// Relaxation state for packing `n` pebbles into one cylinder.
///
/// Owns the schedule (`d_out`, iteration count, cached separation
/// estimate) but not the positions, which the caller passes to every
/// [`step()`](Self::step) and must keep at length `n`.
#[derive(Clone, Debug)]
pub struct JodreyTory {
    bounds: UsableBounds,
    bbox: BoundingBox,
    volume: f64,
    pebble_radius: f64,
    n: usize,
    config: RelaxationConfig,
    state: RelaxationState,
    d_out0: f64,
    d_out: f64,
    d_in: Option<f64>,
    separation: Option<f64>,
    iterations: u64,
    metrics: RelaxationMetrics,
}

impl JodreyTory {
    /// Prepare a run. `d_out` starts at the diameter that would fill the
    /// whole container with `n` spheres.
    pub fn new(
        container: &Container,
        pebble_radius: f64,
        n: usize,
        config: RelaxationConfig,
    ) -> Result<Self, SpaceError> {
        let cylinder = container.as_cylinder()?;
        let bounds = cylinder.usable_bounds(pebble_radius)?;
        let d_out0 = equivalent_diameter(container, n)?;
        Ok(Self {
            bounds,
            bbox: cylinder.bounding_box(),
            volume: cylinder.volume(),
            pebble_radius,
            n,
            config,
            state: RelaxationState::Initial,
            d_out0,
            d_out: d_out0,
            d_in: None,
            separation: None,
            iterations: 0,
            metrics: RelaxationMetrics::default(),
        })
    }

    /// Current state.
    pub fn state(&self) -> RelaxationState {
        self.state
    }

    /// Current nominal outer diameter.
    pub fn d_out(&self) -> f64 {
        self.d_out
    }

    /// Starting nominal outer diameter.
    pub fn d_out0(&self) -> f64 {
        self.d_out0
    }

    /// Shortest rod of the latest round that found any.
    pub fn d_in(&self) -> Option<f64> {
        self.d_in
    }

    /// Contraction steps taken.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Usable region the centres are kept in.
    pub fn bounds(&self) -> &UsableBounds {
        &self.bounds
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RelaxationMetrics {
        &self.metrics
    }

    /// Packing fraction `n` spheres of diameter `d` give in this container.
    pub fn packing_fraction_at(&self, diameter: f64) -> f64 {
        packing_fraction_for_diameter(self.volume, self.n, diameter)
    }

    /// The warning for a failed run, `None` otherwise.
    pub fn warning(&self) -> Option<ConvergenceWarning> {
        let achievable_diameter = self.d_in?;
        let achievable_fraction = self.packing_fraction_at(achievable_diameter);
        match self.state {
            RelaxationState::FailedSlowConvergence => Some(ConvergenceWarning::SlowConvergence {
                achievable_diameter,
                achievable_fraction,
            }),
            RelaxationState::FailedIterationLimit => Some(ConvergenceWarning::IterationLimit {
                iterations: self.iterations,
                achievable_diameter,
                achievable_fraction,
            }),
            _ => None,
        }
    }

    /// Run one round. No-op once the run is finished.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        positions: &mut [Position],
        rng: &mut R,
    ) -> Result<RelaxationState, SpaceError> {
        self.round(positions, rng).map(|report| report.state)
    }

    /// Step until a terminal state.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        positions: &mut [Position],
        rng: &mut R,
    ) -> Result<RelaxationState, SpaceError> {
        self.run_with_observer(positions, rng, &mut |_: &RoundReport| ControlFlow::Continue(()))
    }

    /// Step until a terminal state or until `observer` breaks.
    pub fn run_with_observer<R, O>(
        &mut self,
        positions: &mut [Position],
        rng: &mut R,
        observer: &mut O,
    ) -> Result<RelaxationState, SpaceError>
    where
        R: Rng + ?Sized,
        O: RoundObserver + ?Sized,
    {
        while !self.state.is_terminal() {
            let report = self.round(positions, rng)?;
            if !report.state.is_terminal() && observer.on_round(&report).is_break() {
                log::info!("relaxation cancelled after round {}", report.round);
                self.state = RelaxationState::Cancelled;
            }
        }
        if let Some(warning) = self.warning() {
            log::warn!("{warning}");
        }
        Ok(self.state)
    }

    fn round<R: Rng + ?Sized>(
        &mut self,
        positions: &mut [Position],
        rng: &mut R,
    ) -> Result<RoundReport, SpaceError> {
        let started = Instant::now();
        if self.state.is_terminal() {
            return Ok(RoundReport {
                round: self.metrics.rounds,
                state: self.state,
                rods: 0,
                d_in: self.d_in,
                d_out: self.d_out,
                cell_size: self.metrics.last_cell_size,
            });
        }
        self.state = RelaxationState::Iterating;

        let cell_size = self.cell_size(positions, rng);
        let lattice = Lattice::build(&self.bbox, positions, cell_size)?;
        let rods = detect_rods(&lattice, positions, self.pebble_radius);
        self.metrics.last_cell_size = cell_size;
        self.metrics.last_occupied_cells = lattice.occupied_count();

        let mut clamped = 0;
        for (rod, &length) in &rods {
            clamped += move_pair(positions, *rod, length, self.d_out, &self.bounds);
        }
        self.metrics.record_round(rods.len(), clamped);

        let shortest = min_rod_length(&rods);
        match shortest {
            None => self.state = RelaxationState::Converged,
            Some(d_in) => {
                self.d_in = Some(d_in);
                if self.d_out < d_in {
                    self.state = RelaxationState::FailedSlowConvergence;
                } else {
                    self.d_out -= self.contraction(d_in);
                    self.iterations += 1;
                    if self.iterations > self.config.max_iterations {
                        self.state = RelaxationState::FailedIterationLimit;
                    }
                }
            }
        }

        self.metrics.elapsed_us += started.elapsed().as_micros() as u64;
        let report = RoundReport {
            round: self.metrics.rounds,
            state: self.state,
            rods: rods.len(),
            d_in: shortest,
            d_out: self.d_out,
            cell_size,
        };
        log::debug!(
            "round {}: {} rods, d_in {:?}, d_out {:.6}, cell {:.6}",
            report.round,
            report.rods,
            report.d_in,
            report.d_out,
            report.cell_size,
        );
        Ok(report)
    }

    /// Amount to take off `d_out` after a round whose shortest rod is `d_in`.
    fn contraction(&self, d_in: f64) -> f64 {
        let gap = (self.packing_fraction_at(self.d_out) - self.packing_fraction_at(d_in)).abs();
        let j = if gap > 0.0 && gap.is_finite() {
            (-gap.log10())
                .floor()
                .clamp(-f64::from(SATURATED_EXPONENT), f64::from(SATURATED_EXPONENT)) as i32
        } else {
            SATURATED_EXPONENT
        };
        0.5f64.powi(j) * (self.config.contraction_rate / self.n as f64) * self.d_out0
    }

    fn cell_size<R: Rng + ?Sized>(&mut self, positions: &[Position], rng: &mut R) -> f64 {
        if self.separation.is_none() || self.config.reestimate_separation {
            self.separation = estimate_separation(positions, rng);
        }
        let diameter = 2.0 * self.pebble_radius;
        let cell = match (self.config.cell_floor, self.separation) {
            (CellFloor::PebbleDiameter, Some(delta)) => delta.max(diameter),
            (CellFloor::Unfloored, Some(delta)) if delta.is_finite() && delta > 0.0 => delta,
            _ => diameter,
        };
        cell.max(self.finest_cell())
    }

    /// Smallest cell whose lattice over the bounding box stays within half
    /// of [`Lattice::MAX_DIM`] slabs per axis.
    fn finest_cell(&self) -> f64 {
        self.bbox.extent.max() / (Lattice::MAX_DIM / 2) as f64
    }
}
