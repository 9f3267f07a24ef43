//! Tunable constants for the simplex engine and the search driver. Defaults
//! reproduce the literal constants named throughout the design document.

use std::time::Duration;

/// Options governing a single [`crate::dictionary::Dictionary`]'s pivoting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Maximum eta-file length before a refactor is forced.
    pub max_eta: usize,
    /// Reduced-cost / ratio-test tolerance used to detect optimality and to
    /// break ratio-test ties.
    pub pivot_tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_eta: 30,
            pivot_tolerance: 1e-10,
        }
    }
}

/// Options governing the branch-and-bound search driver (serial or
/// master/worker).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Tolerance used by [`crate::solution::is_integral`].
    pub integrality_tolerance: f64,
    /// Number of worker threads. Zero selects the serial driver.
    pub num_workers: usize,
    /// Number of empty polling passes the master makes over worker channels
    /// before sleeping; see the polling-bug resolution in DESIGN.md.
    pub poll_spin_limit: usize,
    /// Optional wall-clock budget for the whole search.
    pub time_limit: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            integrality_tolerance: 1e-8,
            num_workers: 0,
            poll_spin_limit: 64,
            time_limit: None,
        }
    }
}
