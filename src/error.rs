//! Typed error kinds raised by the simplex engine and the branch-and-bound
//! driver, and which of these are caught internally versus left to
//! propagate.

use derive_more::{Display, Error};

/// A pivot could not proceed. Caught by [`crate::dictionary::Dictionary::pivot`]
/// and converted into a terminal dictionary state; never observed by callers
/// of `pivot` itself.
#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum PivotError {
    /// No entering variable has a positive reduced cost: the dictionary is
    /// already optimal.
    #[display("dictionary is final: no improving reduced cost")]
    Final,
    /// No row in the pivot column is eligible to leave the basis: the
    /// problem is unbounded in the direction of the entering variable.
    #[display("problem is unbounded along the entering column")]
    Unbounded,
}

/// Raised by [`crate::solver::solve`] when the dictionary it drove terminated
/// unbounded. Bubbles up to the branch-and-bound driver, which treats it as
/// "no solution from this branch".
#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum SolverError {
    #[display("relaxation is unbounded")]
    Unbounded,
}

/// Raised by the dense LU factorization used for eta-file refactors. Unlike
/// [`PivotError`] and [`SolverError`], this is fatal: it propagates out of
/// the driver and the caller is expected to broadcast a shutdown signal to
/// any live workers before exiting.
#[derive(Debug, Display, Error, PartialEq, Clone, Copy)]
pub enum LinAlgError {
    /// A diagonal pivot candidate was within `tolerance` of zero; the matrix
    /// is numerically singular.
    #[display("singular matrix: no usable pivot in column {column}")]
    Singular { column: usize },
}
