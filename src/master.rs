//! The master side of the master/worker driver: owns the
//! pending FIFO and the incumbent, dispatches problems to idle workers,
//! and polls for their replies.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::callback::Callback;
use crate::error::LinAlgError;
use crate::options::{SearchOptions, SolverOptions};
use crate::problem::Problem;
use crate::search::{bound_of, SearchState};
use crate::serial::bootstrap;
use crate::solution::Solution;
use crate::terminators::Terminator;
use crate::transport::{ChannelTransport, Message, Transport};
use crate::worker;
use crate::Status;

const POLL_SLEEP: Duration = Duration::from_millis(1);

/// Runs the branch-and-bound search with `num_workers` worker threads.
/// Spawns the fleet, drives the master loop on the calling thread, and
/// joins every worker before returning.
pub fn run(
    root: Problem,
    solver_options: SolverOptions,
    search_options: SearchOptions,
    num_workers: usize,
    callback: &mut dyn Callback,
    terminator: &mut dyn Terminator,
) -> Result<(Option<Solution>, Status), LinAlgError> {
    terminator.initialize();
    let mut state = SearchState::new();

    if let Some(status) = bootstrap(&root, solver_options, search_options, &mut state, callback)? {
        return Ok((state.finish(), status));
    }

    let (transport, ends) = ChannelTransport::new(num_workers);
    let (fault_tx, fault_rx) = mpsc::channel();

    let handles: Vec<_> = ends
        .into_iter()
        .map(|end| {
            let faults = fault_tx.clone();
            thread::spawn(move || worker::run(end, solver_options, search_options, faults))
        })
        .collect();
    drop(fault_tx);

    let mut idle = vec![true; num_workers];
    let mut empty_polls = 0usize;
    let mut final_status = Status::Optimal;

    'outer: loop {
        if let Some(status) = terminator.terminate() {
            info!(status = ?status, "search interrupted");
            final_status = status;
            break;
        }

        dispatch(&transport, &mut state, &mut idle);

        if state.is_pending_empty() && idle.iter().all(|&i| i) {
            break;
        }

        match transport.try_recv_any() {
            Some((w, message)) => {
                empty_polls = 0;
                handle_message(w, message, &transport, &mut state, &mut idle);
                callback.on_node(state.stats());
            }
            None => {
                empty_polls += 1;
                if empty_polls > search_options.poll_spin_limit {
                    thread::sleep(POLL_SLEEP);
                }
                if let Ok(e) = fault_rx.try_recv() {
                    broadcast_kill(&transport);
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(e);
                }
                continue 'outer;
            }
        }
    }

    broadcast_kill(&transport);
    for handle in handles {
        let _ = handle.join();
    }
    if let Ok(e) = fault_rx.try_recv() {
        return Err(e);
    }

    debug!(stats = ?state.stats(), "search complete");
    Ok((state.finish(), final_status))
}

fn broadcast_kill(transport: &ChannelTransport) {
    for w in 0..transport.worker_count() {
        transport.send(w, Message::Kill);
    }
}

/// Pops pending problems onto idle workers, honoring the pre-solve prune
/// check before ever dispatching.
fn dispatch(transport: &ChannelTransport, state: &mut SearchState, idle: &mut [bool]) {
    loop {
        let Some(w) = idle.iter().position(|&i| i) else {
            return;
        };
        let Some(problem) = state.pop() else {
            return;
        };

        state.record_node();
        let bound = bound_of(&problem);
        if state.prunes(bound) {
            state.record_pruned();
            continue;
        }

        idle[w] = false;
        transport.send(w, Message::Problem(problem));
    }
}

fn handle_message(
    worker: usize,
    message: Message,
    transport: &ChannelTransport,
    state: &mut SearchState,
    idle: &mut [bool],
) {
    match message {
        Message::IntSol(solution) => {
            state.offer_integral(solution);
            idle[worker] = true;
        }
        Message::DecSol(exported) => {
            state.record_decimal();
            let proceed = !state.prunes(bound_of(&exported));
            if !proceed {
                state.record_pruned();
            }
            transport.send(worker, Message::Proceed(proceed));
            idle[worker] = !proceed;
        }
        Message::NoSol => {
            state.record_infeasible();
            idle[worker] = true;
        }
        Message::Problem(child) => {
            state.push(child);
        }
        Message::Proceed(_) | Message::Kill => {
            unreachable!("master never receives {message:?} from a worker")
        }
    }
}
