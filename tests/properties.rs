//! Universal and ambient-stack properties that must hold independent of
//! any one scenario's numbers.

use faer::{Col, Mat};
use ilp_solver::callback::NoOpCallback;
use ilp_solver::dictionary::Dictionary;
use ilp_solver::error::{LinAlgError, PivotError, SolverError};
use ilp_solver::options::{SearchOptions, SolverOptions};
use ilp_solver::problem::Problem;
use ilp_solver::search::SearchState;
use ilp_solver::solution::Solution;
use ilp_solver::terminators::{Terminator, TimeOutTerminator};
use ilp_solver::Status;
use rstest::rstest;

#[allow(non_snake_case)]
fn sample_problem() -> Problem {
    let A = Mat::from_fn(2, 2, |i, j| [[6.0, 4.0], [1.0, 2.0]][i][j]);
    let b = Col::from_fn(2, |i| [24.0, 6.0][i]);
    let c = Col::from_fn(2, |i| [5.0, 4.0][i]);
    Problem::new(A, b, c)
}

/// Property 2: every completed pivot either improves the objective or
/// leaves it unchanged (degenerate pivot) — it never regresses, which is
/// exactly what the ratio test's feasibility guarantee buys.
#[test]
fn pivoting_never_decreases_the_objective() {
    let problem = sample_problem();
    let mut dict = Dictionary::new(&problem, SolverOptions::default());
    let mut callback = NoOpCallback;

    let mut last = dict.objective_value();
    while dict.can_pivot() {
        dict.pivot(&mut callback).unwrap();
        let now = dict.objective_value();
        assert!(now >= last - 1e-9, "objective regressed from {last} to {now}");
        last = now;
    }
}

/// Property 3: the integrality predicate's boundary behavior around a
/// tolerance band.
#[rstest]
#[case(3.0, true)]
#[case(2.999999995, true)]
#[case(3.000000005, true)]
#[case(2.9999, false)]
#[case(3.00001, false)]
fn integrality_predicate_respects_its_tolerance_band(#[case] value: f64, #[case] expected: bool) {
    let solution = Solution::new(0.0, vec![value]);
    assert_eq!(solution.is_integral(1e-8), expected);
}

/// Property 5: the incumbent is monotone non-decreasing no matter what
/// order solutions arrive in.
#[test]
fn incumbent_never_regresses_as_solutions_arrive() {
    let mut state = SearchState::new();
    let arrivals = [4.0, 9.0, 2.0, 9.0, 15.0, 1.0, 15.0];
    let mut best_seen = f64::NEG_INFINITY;

    for &objective in &arrivals {
        state.offer_integral(Solution::new(objective, vec![objective]));
        let current = state.incumbent().unwrap().objective;
        assert!(current >= best_seen);
        best_seen = current;
    }
    assert_eq!(best_seen, 15.0);
}

/// Property 6: a node whose bound cannot beat the incumbent is always
/// pruned, and one that can never is, regardless of how close the margin
/// is.
#[rstest]
#[case(9.999, true)]
#[case(10.0, true)]
#[case(10.001, false)]
fn pruning_is_exact_at_the_incumbent_boundary(#[case] bound: f64, #[case] expected_prune: bool) {
    let mut state = SearchState::new();
    state.offer_integral(Solution::new(10.0, vec![1.0]));
    assert_eq!(state.prunes(bound), expected_prune);
}

/// Property 8: every error kind the engine raises is a real
/// `std::error::Error`, so it composes with `?` under any `Box<dyn Error>`
/// boundary the way the rest of the ambient stack expects.
#[test]
fn every_error_kind_implements_the_error_trait() -> Result<(), Box<dyn std::error::Error>> {
    fn raise_pivot() -> Result<(), PivotError> {
        Err(PivotError::Unbounded)
    }
    fn raise_solver() -> Result<(), SolverError> {
        Err(SolverError::Unbounded)
    }
    fn raise_linalg() -> Result<(), LinAlgError> {
        Err(LinAlgError::Singular { column: 0 })
    }

    assert!(raise_pivot().is_err());
    assert!(raise_solver().is_err());
    assert!(raise_linalg().is_err());

    // These conversions only typecheck because each error implements
    // `std::error::Error` (`derive_more::Error`); a missing impl would
    // fail to compile here, not panic at runtime.
    let _: Box<dyn std::error::Error> = Box::new(PivotError::Unbounded);
    let _: Box<dyn std::error::Error> = Box::new(SolverError::Unbounded);
    let _: Box<dyn std::error::Error> = Box::new(LinAlgError::Singular { column: 0 });
    Ok(())
}

/// Property 9: the documented option defaults are the literal constants,
/// not whatever happens to fall out of `Default::default()`'s expansion.
#[test]
fn option_defaults_match_the_documented_constants() {
    let solver = SolverOptions::default();
    assert_eq!(solver.max_eta, 30);
    assert_eq!(solver.pivot_tolerance, 1e-10);

    let search = SearchOptions::default();
    assert_eq!(search.integrality_tolerance, 1e-8);
    assert_eq!(search.num_workers, 0);
    assert!(search.time_limit.is_none());
}

/// Property 10: a zero-second time-out terminator fires on its very first
/// check, after `initialize` has reset its clock.
#[test]
fn zero_second_timeout_fires_immediately() {
    let mut terminator = TimeOutTerminator::new(0);
    terminator.initialize();
    assert_eq!(terminator.terminate(), Some(Status::TimeLimit));
}

/// A `MultipleTerminators` combinator fires as soon as any one of its
/// members does, even when every other member would run forever.
#[test]
fn combined_terminator_fires_on_its_first_eligible_member() {
    use ilp_solver::terminators::MultipleTerminators;

    struct NeverFires;
    impl Terminator for NeverFires {
        fn terminate(&mut self) -> Option<Status> {
            None
        }
    }

    let mut combined = MultipleTerminators::new(vec![
        Box::new(NeverFires),
        Box::new(TimeOutTerminator::new(0)),
    ]);
    combined.initialize();
    assert_eq!(combined.terminate(), Some(Status::TimeLimit));
}
