//! Turns one fractional relaxation into two integer-tightened children.

use faer::{Col, Mat};

use crate::options::SearchOptions;
use crate::problem::Problem;

/// Row index of the first (smallest-index) non-integral basic value in
/// `b`, or `None` if every entry is already integral within `tolerance`.
fn first_fractional_row(b: &Col<f64>, tolerance: f64) -> Option<usize> {
    (0..b.nrows()).find(|&i| (b[i] - tolerance).floor() != (b[i] + tolerance).floor())
}

/// Appends `row` to `a` as a new final row, leaving column count unchanged.
#[allow(non_snake_case)]
fn append_row(a: &Mat<f64>, row: &[f64]) -> Mat<f64> {
    let m = a.nrows();
    let n = a.ncols();
    Mat::from_fn(m + 1, n, |i, j| if i < m { a[(i, j)] } else { row[j] })
}

fn append_entry(v: &Col<f64>, entry: f64) -> Col<f64> {
    let m = v.nrows();
    Col::from_fn(m + 1, |i| if i < m { v[i] } else { entry })
}

/// Given the exported Problem of a fractional relaxation, produces the two
/// children (lower/upper) that split on the most deterministic branching
/// row, each handed back in dual form for cheap re-entry into the simplex.
///
/// Returns `None` if `problem`'s current basic values are already
/// integral — callers should check [`crate::solution::Solution::is_integral`]
/// before calling this, but this guards against being called anyway.
#[allow(non_snake_case)]
pub fn branch(problem: &Problem, options: SearchOptions) -> Option<(Problem, Problem)> {
    let row = first_fractional_row(&problem.b, options.integrality_tolerance)?;

    let m = problem.n_rows();
    let n = problem.n_cols();
    let beta = problem.b[row];
    let a_row: Vec<f64> = (0..n).map(|j| problem.A[(row, j)]).collect();
    let new_slack = m + n;

    let lower_row: Vec<f64> = a_row.iter().map(|v| -v).collect();
    let lower = Problem {
        A: append_row(&problem.A, &lower_row),
        b: append_entry(&problem.b, beta.floor() - beta),
        c: problem.c.clone(),
        z: problem.z,
        base: {
            let mut base = problem.base.clone();
            base.push(new_slack);
            base
        },
        non_base: problem.non_base.clone(),
        dual: problem.dual,
    };

    let upper = Problem {
        A: append_row(&problem.A, &a_row),
        b: append_entry(&problem.b, beta - beta.ceil()),
        c: problem.c.clone(),
        z: problem.z,
        base: {
            let mut base = problem.base.clone();
            base.push(new_slack);
            base
        },
        non_base: problem.non_base.clone(),
        dual: problem.dual,
    };

    Some((lower.dual(), upper.dual()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(non_snake_case)]
    fn fractional_problem() -> Problem {
        let A = Mat::from_fn(1, 1, |_, _| 1.0);
        let b = Col::from_fn(1, |_| 1.5);
        let c = Col::from_fn(1, |_| 1.0);
        Problem::new(A, b, c)
    }

    #[test]
    fn branches_on_the_first_fractional_row() {
        let problem = fractional_problem();
        let (lower, upper) = branch(&problem, SearchOptions::default()).unwrap();

        // dual() negates/transposes, so row-count became column-count.
        assert_eq!(lower.n_cols(), 2);
        assert_eq!(upper.n_cols(), 2);
        assert_eq!(lower.base.len(), problem.non_base.len());
    }

    #[test]
    fn no_branch_when_already_integral() {
        let A = Mat::from_fn(1, 1, |_, _| 1.0);
        let b = Col::from_fn(1, |_| 2.0);
        let c = Col::from_fn(1, |_| 1.0);
        let problem = Problem::new(A, b, c);
        assert!(branch(&problem, SearchOptions::default()).is_none());
    }
}
