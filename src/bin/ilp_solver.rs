//! Diagnostic CLI: generates a random MILP instance and solves it with
//! either the serial driver or the master/worker driver.
//!
//! Usage: `ilp-solver <rows> <cols> <seed> [--workers W]`

use std::process::ExitCode;
use std::time::Instant;

use ilp_solver::callback::ProgressCallback;
use ilp_solver::generator;
use ilp_solver::options::{SearchOptions, SolverOptions};
use ilp_solver::terminators::InterruptTerminator;
use ilp_solver::{master, serial};
use tracing::{error, info};

struct Args {
    rows: usize,
    cols: usize,
    seed: u64,
    workers: usize,
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = std::env::args().collect();
    if argv.len() < 4 {
        return Err(format!(
            "usage: {} <rows> <cols> <seed> [--workers W]",
            argv.first().map(String::as_str).unwrap_or("ilp-solver")
        ));
    }

    let rows: usize = argv[1].parse().map_err(|_| "rows must be a non-negative integer".to_string())?;
    let cols: usize = argv[2].parse().map_err(|_| "cols must be a non-negative integer".to_string())?;
    let seed: u64 = argv[3].parse().map_err(|_| "seed must be a non-negative integer".to_string())?;

    let mut workers = 0usize;
    let mut i = 4;
    while i < argv.len() {
        if argv[i] == "--workers" && i + 1 < argv.len() {
            workers = argv[i + 1]
                .parse()
                .map_err(|_| "--workers must be a non-negative integer".to_string())?;
            i += 2;
        } else {
            return Err(format!("unrecognized argument: {}", argv[i]));
        }
    }

    Ok(Args { rows, cols, seed, workers })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    info!(rows = args.rows, cols = args.cols, seed = args.seed, workers = args.workers, "generating instance");
    let problem = generator::generate(args.rows, args.cols, args.seed);

    let mut terminator = InterruptTerminator::new();
    let mut callback = ProgressCallback::new(100);

    let started = Instant::now();
    let outcome = if args.workers == 0 {
        serial::run(
            problem,
            SolverOptions::default(),
            SearchOptions::default(),
            &mut callback,
            &mut terminator,
        )
    } else {
        master::run(
            problem,
            SolverOptions::default(),
            SearchOptions { num_workers: args.workers, ..SearchOptions::default() },
            args.workers,
            &mut callback,
            &mut terminator,
        )
    };
    let elapsed = started.elapsed();

    match outcome {
        Ok((Some(solution), status)) => {
            info!(status = ?status, elapsed_ms = elapsed.as_millis(), "search finished");
            println!("objective: {}", solution.objective);
            println!("x: {:?}", solution.x);
            println!("wall time: {:.3}s", elapsed.as_secs_f64());
            ExitCode::SUCCESS
        }
        Ok((None, status)) => {
            info!(status = ?status, elapsed_ms = elapsed.as_millis(), "search finished without an incumbent");
            println!("No solution found");
            println!("wall time: {:.3}s", elapsed.as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "search aborted on a fatal linear-algebra error");
            println!("No solution found");
            ExitCode::SUCCESS
        }
    }
}
