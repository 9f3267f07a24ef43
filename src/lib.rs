//! A branch-and-bound MILP solver with a revised-simplex LP engine.
//!
//! [`problem`] and [`dictionary`] implement the simplex core; [`solver`]
//! and [`brancher`] build on them to produce and consume branch-and-bound
//! nodes; [`search`], [`master`], [`worker`], and [`serial`] implement the
//! scheduler.

pub mod brancher;
pub mod callback;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod linalg;
pub mod master;
pub mod options;
pub mod problem;
pub mod search;
pub mod serial;
pub mod solution;
pub mod solver;
pub mod terminators;
pub mod transport;
pub mod worker;

/// Outcome of a search or of an interruptible operation within one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Status {
    #[default]
    InProgress,
    Optimal,
    Infeasible,
    Unbounded,
    Unknown,
    TimeLimit,
    IterationLimit,
    Interrupted,
}
