//! The degenerate W=0 driver: inlines the worker role in the
//! calling thread, no threads or channels involved.

use tracing::{debug, info};

use crate::brancher::branch;
use crate::callback::Callback;
use crate::error::LinAlgError;
use crate::options::{SearchOptions, SolverOptions};
use crate::problem::Problem;
use crate::search::{bound_of, SearchState};
use crate::solution::Solution;
use crate::solver::{solve_node, NodeOutcome, SolveError};
use crate::terminators::Terminator;
use crate::Status;

/// Runs the branch-and-bound search to completion (or until `terminator`
/// fires), returning the best incumbent found and the terminal [`Status`].
pub fn run(
    root: Problem,
    solver_options: SolverOptions,
    search_options: SearchOptions,
    callback: &mut dyn Callback,
    terminator: &mut dyn Terminator,
) -> Result<(Option<Solution>, Status), LinAlgError> {
    terminator.initialize();
    let mut state = SearchState::new();

    if let Some(status) = bootstrap(&root, solver_options, search_options, &mut state, callback)? {
        return Ok((state.finish(), status));
    }

    while !state.is_pending_empty() {
        if let Some(status) = terminator.terminate() {
            info!(status = ?status, "search interrupted");
            return Ok((state.finish(), status));
        }

        let problem = state.pop().expect("checked non-empty above");
        process_node(&problem, solver_options, search_options, &mut state, callback)?;
    }

    Ok((state.finish(), Status::Optimal))
}

/// Solves the root relaxation and seeds `state`'s pending queue. Returns
/// `Some(status)` if the search is already finished (root integral, or the
/// terminator fired before any branching could start).
pub(crate) fn bootstrap(
    root: &Problem,
    solver_options: SolverOptions,
    search_options: SearchOptions,
    state: &mut SearchState,
    callback: &mut dyn Callback,
) -> Result<Option<Status>, LinAlgError> {
    match solve_node(
        root,
        solver_options,
        search_options.integrality_tolerance,
        callback,
    ) {
        Ok(NodeOutcome::Integral(solution)) => {
            state.offer_integral(solution);
            Ok(Some(Status::Optimal))
        }
        Ok(NodeOutcome::Fractional { exported, .. }) => {
            if let Some((lower, upper)) = branch(&exported, search_options) {
                state.push(lower);
                state.push(upper);
            }
            Ok(None)
        }
        Err(SolveError::Unbounded(_)) => Ok(Some(Status::Unbounded)),
        Err(SolveError::LinAlg(e)) => Err(e),
    }
}

fn process_node(
    problem: &Problem,
    solver_options: SolverOptions,
    search_options: SearchOptions,
    state: &mut SearchState,
    callback: &mut dyn Callback,
) -> Result<(), LinAlgError> {
    state.record_node();

    let bound = bound_of(problem);
    if state.prunes(bound) {
        state.record_pruned();
        callback.on_node(state.stats());
        return Ok(());
    }

    match solve_node(
        problem,
        solver_options,
        search_options.integrality_tolerance,
        callback,
    ) {
        Ok(NodeOutcome::Integral(solution)) => {
            state.offer_integral(solution);
        }
        Ok(NodeOutcome::Fractional { exported, .. }) => {
            state.record_decimal();
            if let Some((lower, upper)) = branch(&exported, search_options) {
                state.push(lower);
                state.push(upper);
            }
        }
        Err(SolveError::Unbounded(_)) => {
            state.record_infeasible();
        }
        Err(SolveError::LinAlg(e)) => return Err(e),
    }

    debug!(stats = ?state.stats(), "processed node");
    callback.on_node(state.stats());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::NoOpCallback;
    use faer::{Col, Mat};

    #[allow(non_snake_case)]
    fn integral_problem() -> Problem {
        // max x s.t. x <= 4, x integer -> optimum x=4, obj=4.
        let A = Mat::from_fn(1, 1, |_, _| 1.0);
        let b = Col::from_fn(1, |_| 4.0);
        let c = Col::from_fn(1, |_| 1.0);
        Problem::new(A, b, c)
    }

    #[test]
    fn serial_search_finds_the_obvious_integral_optimum() {
        let mut terminator = PassThroughTerminator;
        let (solution, status) = run(
            integral_problem(),
            SolverOptions::default(),
            SearchOptions::default(),
            &mut NoOpCallback,
            &mut terminator,
        )
        .unwrap();

        assert_eq!(status, Status::Optimal);
        let solution = solution.unwrap();
        assert!((solution.objective - 4.0).abs() < 1e-6);
    }

    #[test]
    fn serial_search_branches_to_an_integral_optimum() {
        // max x + y s.t. 2x + y <= 5.5, x,y >= 0, integer.
        // LP relax optimum is fractional; the integral optimum is 3.
        let A = Mat::from_fn(1, 2, |_, j| [2.0, 1.0][j]);
        let b = Col::from_fn(1, |_| 5.5);
        let c = Col::from_fn(1, |j| [1.0, 1.0][j]);
        let problem = Problem::new(A, b, c);

        let mut terminator = PassThroughTerminator;
        let (solution, status) = run(
            problem,
            SolverOptions::default(),
            SearchOptions::default(),
            &mut NoOpCallback,
            &mut terminator,
        )
        .unwrap();

        assert_eq!(status, Status::Optimal);
        let solution = solution.unwrap();
        assert!(solution.is_integral(1e-8));
    }

    struct PassThroughTerminator;
    impl Terminator for PassThroughTerminator {
        fn terminate(&mut self) -> Option<Status> {
            None
        }
    }
}
