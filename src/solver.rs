//! Drives one [`Problem`] relaxation to optimality: builds a
//! [`Dictionary`], pivots to a terminal state, and recovers a primal
//! [`Solution`] whether or not the Problem itself was handed over in dual
//! form.

use derive_more::{Display, Error};

use crate::callback::Callback;
use crate::dictionary::Dictionary;
use crate::error::{LinAlgError, SolverError};
use crate::options::SolverOptions;
use crate::problem::Problem;
use crate::solution::Solution;

/// Everything [`solve`] can fail with: the node's own unboundedness, or a
/// fatal linear-algebra failure from a forced eta-file refactor.
#[derive(Debug, Display, Error, Clone, Copy)]
pub enum SolveError {
    #[display("{_0}")]
    Unbounded(SolverError),
    #[display("{_0}")]
    LinAlg(LinAlgError),
}

/// Pivots `problem` to a terminal dictionary and returns its primal
/// solution.
///
/// If `problem.dual` is set, the dictionary's final state is exported,
/// dual-transformed back to primal, and re-loaded into a fresh dictionary
/// that is already final at construction — its `get_solution` performs no
/// further pivoting, only the basis solves needed to read off values.
pub fn solve(
    problem: &Problem,
    options: SolverOptions,
    callback: &mut dyn Callback,
) -> Result<Solution, SolveError> {
    let mut dict = Dictionary::new(problem, options);

    while dict.can_pivot() {
        dict.pivot(callback).map_err(SolveError::LinAlg)?;
    }
    if dict.is_unbounded() {
        return Err(SolveError::Unbounded(SolverError::Unbounded));
    }

    if !problem.dual {
        return Ok(dict.get_solution());
    }

    let dual_optimum = dict.to_problem();
    let primal = dual_optimum.dual();
    let primal_dict = Dictionary::new(&primal, options);
    Ok(primal_dict.get_solution())
}

/// What pivoting one branch-and-bound node to a terminal dictionary
/// produced during bootstrap or the main loop: either an integral solution, or a
/// fractional one paired with the exported Problem the brancher needs.
pub enum NodeOutcome {
    Integral(Solution),
    Fractional { solution: Solution, exported: Problem },
}

/// Like [`solve`], but stops short of recovering a solution when the
/// result is fractional — instead returning the dictionary's own exported
/// form so the caller can hand it to [`crate::brancher::branch`] without
/// re-solving.
pub fn solve_node(
    problem: &Problem,
    options: SolverOptions,
    integrality_tolerance: f64,
    callback: &mut dyn Callback,
) -> Result<NodeOutcome, SolveError> {
    let mut dict = Dictionary::new(problem, options);

    while dict.can_pivot() {
        dict.pivot(callback).map_err(SolveError::LinAlg)?;
    }
    if dict.is_unbounded() {
        return Err(SolveError::Unbounded(SolverError::Unbounded));
    }

    let exported = dict.to_problem();
    let solution = if problem.dual {
        let primal = exported.dual();
        Dictionary::new(&primal, options).get_solution()
    } else {
        dict.get_solution()
    };

    if solution.is_integral(integrality_tolerance) {
        Ok(NodeOutcome::Integral(solution))
    } else {
        Ok(NodeOutcome::Fractional { solution, exported })
    }
}
