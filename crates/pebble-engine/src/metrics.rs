//! Per-run counters for the relaxation.
//!
//! [`RelaxationMetrics`] is filled in as [`JodreyTory`](crate::JodreyTory)
//! steps and copied into the final [`PackReport`](crate::PackReport).

/// Work done by one relaxation run.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelaxationMetrics {
    /// Detection rounds run, including the final empty one.
    pub rounds: u64,
    /// Rods moved, summed over all rounds.
    pub rods_resolved: u64,
    /// Coordinates pulled back into the usable region by the mover.
    pub clamped_moves: u64,
    /// Largest rod set seen in a single round.
    pub max_rods_per_round: usize,
    /// Lattice cell size used by the most recent round.
    pub last_cell_size: f64,
    /// Occupied lattice cells in the most recent round.
    pub last_occupied_cells: usize,
    /// Wall-clock time spent inside `step()`, in microseconds.
    pub elapsed_us: u64,
}

impl RelaxationMetrics {
    /// Fold one round's counts into the totals.
    pub(crate) fn record_round(&mut self, rods: usize, clamped: u32) {
        self.rounds += 1;
        self.rods_resolved += rods as u64;
        self.clamped_moves += u64::from(clamped);
        self.max_rods_per_round = self.max_rods_per_round.max(rods);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RelaxationMetrics::default();
        assert_eq!(m.rounds, 0);
        assert_eq!(m.rods_resolved, 0);
        assert_eq!(m.clamped_moves, 0);
        assert_eq!(m.max_rods_per_round, 0);
        assert_eq!(m.last_cell_size, 0.0);
        assert_eq!(m.elapsed_us, 0);
    }

    #[test]
    fn record_round_accumulates() {
        let mut m = RelaxationMetrics::default();
        m.record_round(5, 1);
        m.record_round(3, 0);
        m.record_round(0, 0);
        assert_eq!(m.rounds, 3);
        assert_eq!(m.rods_resolved, 8);
        assert_eq!(m.clamped_moves, 1);
        assert_eq!(m.max_rods_per_round, 5);
    }
}
