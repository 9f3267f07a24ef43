//! The tagged, ordered point-to-point message bus between the master and
//! its workers. Realized here over `std::sync::mpsc`, one channel
//! pair per worker, behind a [`Transport`] trait so a future MPI- or
//! socket-based transport could stand in without touching `master`/`worker`.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::problem::Problem;
use crate::solution::Solution;

/// One message bus payload: PROBLEM, INT_SOL, DEC_SOL, NO_SOL, PROCEED, and
/// KILL tags, realized as this enum's variants.
#[derive(Debug, Clone)]
pub enum Message {
    /// A relaxation for the receiver to solve.
    Problem(Problem),
    /// An integral solution found at a node.
    IntSol(Solution),
    /// A fractional solution; the receiver (master) replies with `Proceed`.
    DecSol(Problem),
    /// The node was infeasible or unbounded.
    NoSol,
    /// Master's reply to `DecSol`: true if the reported bound still beats
    /// the incumbent and the worker should branch and continue.
    Proceed(bool),
    /// Shut down: no more problems will be sent.
    Kill,
}

/// The master's view of the bus: send to a specific worker, and poll for
/// any message that has arrived from any worker without blocking.
pub trait Transport {
    fn send(&self, worker: usize, message: Message);
    fn try_recv_any(&self) -> Option<(usize, Message)>;
    fn worker_count(&self) -> usize;
}

/// A worker's private endpoint: blocking receive from the master, and a
/// send channel back.
pub struct WorkerEnd {
    pub from_master: Receiver<Message>,
    pub to_master: Sender<Message>,
}

impl WorkerEnd {
    pub fn recv(&self) -> Message {
        self.from_master
            .recv()
            .expect("master dropped its sender before sending KILL")
    }

    pub fn send(&self, message: Message) {
        let _ = self.to_master.send(message);
    }
}

/// The in-process realization of [`Transport`]: a `Sender`/`Receiver` pair
/// per worker, owned by the master.
pub struct ChannelTransport {
    to_workers: Vec<Sender<Message>>,
    from_workers: Vec<Receiver<Message>>,
}

impl ChannelTransport {
    /// Builds the master-side transport and the matching `WorkerEnd` for
    /// each of `num_workers` workers, in worker-id order.
    pub fn new(num_workers: usize) -> (Self, Vec<WorkerEnd>) {
        let mut to_workers = Vec::with_capacity(num_workers);
        let mut from_workers = Vec::with_capacity(num_workers);
        let mut ends = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (master_tx, worker_rx) = mpsc::channel();
            let (worker_tx, master_rx) = mpsc::channel();
            to_workers.push(master_tx);
            from_workers.push(master_rx);
            ends.push(WorkerEnd {
                from_master: worker_rx,
                to_master: worker_tx,
            });
        }

        (
            Self {
                to_workers,
                from_workers,
            },
            ends,
        )
    }
}

impl Transport for ChannelTransport {
    fn send(&self, worker: usize, message: Message) {
        let _ = self.to_workers[worker].send(message);
    }

    fn try_recv_any(&self) -> Option<(usize, Message)> {
        for (i, rx) in self.from_workers.iter().enumerate() {
            if let Ok(message) = rx.try_recv() {
                return Some((i, message));
            }
        }
        None
    }

    fn worker_count(&self) -> usize {
        self.to_workers.len()
    }
}
