//! The worker side of the master/worker driver. Each worker is
//! logically single-threaded: it blocks on `recv` between a `PROBLEM`, a
//! `PROCEED` reply, and `KILL`.

use std::sync::mpsc::Sender;

use crate::brancher::branch;
use crate::callback::NoOpCallback;
use crate::error::LinAlgError;
use crate::options::{SearchOptions, SolverOptions};
use crate::problem::Problem;
use crate::solver::{solve_node, NodeOutcome, SolveError};
use crate::transport::{Message, WorkerEnd};

/// Blocks on `end.recv()` for a `Problem` or `Kill` until `Kill` arrives.
/// Any fatal [`LinAlgError`] encountered while solving is reported on
/// `faults` and ends this worker's loop — the master is expected to
/// broadcast `Kill` to the rest of the fleet once it observes the fault.
pub fn run(end: WorkerEnd, solver_options: SolverOptions, search_options: SearchOptions, faults: Sender<LinAlgError>) {
    loop {
        match end.recv() {
            Message::Problem(problem) => {
                if let Err(e) = process(problem, &end, solver_options, search_options) {
                    let _ = faults.send(e);
                    return;
                }
            }
            Message::Kill => return,
            other => unreachable!("worker received unexpected message {other:?}"),
        }
    }
}

/// Solves `problem`; on a fractional result, sends one child back to the
/// master and keeps solving the other itself without returning to idle.
fn process(
    mut problem: Problem,
    end: &WorkerEnd,
    solver_options: SolverOptions,
    search_options: SearchOptions,
) -> Result<(), LinAlgError> {
    let mut callback = NoOpCallback;
    loop {
        match solve_node(
            &problem,
            solver_options,
            search_options.integrality_tolerance,
            &mut callback,
        ) {
            Ok(NodeOutcome::Integral(solution)) => {
                end.send(Message::IntSol(solution));
                return Ok(());
            }
            Ok(NodeOutcome::Fractional { exported, .. }) => {
                end.send(Message::DecSol(exported.clone()));
                match end.recv() {
                    Message::Proceed(true) => match branch(&exported, search_options) {
                        Some((lower, upper)) => {
                            end.send(Message::Problem(lower));
                            problem = upper;
                        }
                        None => return Ok(()),
                    },
                    Message::Proceed(false) => return Ok(()),
                    other => unreachable!("worker received unexpected reply {other:?}"),
                }
            }
            Err(SolveError::Unbounded(_)) => {
                end.send(Message::NoSol);
                return Ok(());
            }
            Err(SolveError::LinAlg(e)) => return Err(e),
        }
    }
}
