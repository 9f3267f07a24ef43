//! The revised-simplex engine: pivots a dictionary built from a
//! [`Problem`] to optimality (or unboundedness), tracking its basis as an
//! LU pair plus an ordered eta file rather than materializing the basis
//! matrix between pivots.

use faer::{Col, Mat};

use crate::callback::Callback;
use crate::error::{LinAlgError, PivotError};
use crate::linalg::basis::Basis;
use crate::linalg::eta::EtaMatrix;
use crate::options::SolverOptions;
use crate::problem::Problem;
use crate::solution::Solution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DictState {
    Pivoting,
    Final,
    Unbounded,
}

enum TryPivotError {
    Pivot(PivotError),
    LinAlg(LinAlgError),
}

/// One relaxed LP node's revised-simplex dictionary.
///
/// `ext_A`/`ext_c` are built once at construction as `[A | I]` / `[c | 0]`
/// over the global variable id space `0..m+n` (ids `0..n` are structural
/// columns of `A`, ids `n..n+m` are the identity/slack block) and are
/// never reshuffled afterward. `base`/`non_base` instead drift: a pivot
/// swaps the global ids they hold in place, so a slot position `i`/`j`
/// only ever names a global id via `base[i]`/`non_base[j]` — every read
/// of `ext_A`/`ext_c` must go through that lookup, never index a slot
/// directly.
#[allow(non_snake_case)]
pub struct Dictionary {
    m: usize,
    n: usize,
    ext_A: Mat<f64>,
    ext_c: Col<f64>,
    b: Col<f64>,
    z: f64,
    base: Vec<usize>,
    non_base: Vec<usize>,
    dual: bool,
    basis: Basis,
    state: DictState,
    iterations: usize,
    options: SolverOptions,
}

fn dot(a: &Col<f64>, b: &Col<f64>) -> f64 {
    (0..a.nrows()).map(|i| a[i] * b[i]).sum()
}

fn argmax(v: &Col<f64>) -> (usize, f64) {
    let mut best_i = 0;
    let mut best_v = v[0];
    for i in 1..v.nrows() {
        if v[i] > best_v {
            best_v = v[i];
            best_i = i;
        }
    }
    (best_i, best_v)
}

impl Dictionary {
    #[allow(non_snake_case)]
    pub fn new(problem: &Problem, options: SolverOptions) -> Self {
        let m = problem.n_rows();
        let n = problem.n_cols();
        let x = m + n;

        let ext_A = Mat::from_fn(m, x, |i, j| {
            if j < n {
                problem.A[(i, j)]
            } else if i == j - n {
                1.0
            } else {
                0.0
            }
        });
        let ext_c = Col::from_fn(x, |j| if j < n { problem.c[j] } else { 0.0 });

        Self {
            m,
            n,
            ext_A,
            ext_c,
            b: problem.b.clone(),
            z: problem.z,
            base: problem.base.clone(),
            non_base: problem.non_base.clone(),
            dual: problem.dual,
            basis: Basis::identity(m, options.max_eta, options.pivot_tolerance),
            state: DictState::Pivoting,
            iterations: 0,
            options,
        }
    }

    pub fn can_pivot(&self) -> bool {
        self.state == DictState::Pivoting
    }

    pub fn is_unbounded(&self) -> bool {
        self.state == DictState::Unbounded
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn c_b(&self) -> Col<f64> {
        Col::from_fn(self.m, |i| self.ext_c[self.base[i]])
    }

    fn c_n(&self) -> Col<f64> {
        Col::from_fn(self.n, |j| self.ext_c[self.non_base[j]])
    }

    fn reduced_costs(&self, pi: &Col<f64>) -> Col<f64> {
        let c_n = self.c_n();
        Col::from_fn(self.n, |j| {
            let g = self.non_base[j];
            let mut s = 0.0;
            for i in 0..self.m {
                s += pi[i] * self.ext_A[(i, g)];
            }
            c_n[j] - s
        })
    }

    /// Solves `B d = -A_j`: the pivot column during a pivot's ratio test,
    /// and (unnegated sign aside) the column `to_problem` exports. `j` is
    /// a non-basic slot; the column actually read is `non_base[j]`.
    fn pivot_column(&self, j: usize) -> Col<f64> {
        let g = self.non_base[j];
        let neg = Col::from_fn(self.m, |i| -self.ext_A[(i, g)]);
        self.basis.solve(&neg)
    }

    /// Attempts one pivot. A no-op if the dictionary is already
    /// FINAL or UNBOUNDED. Internal [`PivotError`]s are converted into
    /// terminal state and never escape; a [`LinAlgError`] from a forced
    /// refactor is fatal and propagates.
    pub fn pivot(&mut self, callback: &mut dyn Callback) -> Result<(), LinAlgError> {
        if !self.can_pivot() {
            return Ok(());
        }

        match self.try_pivot() {
            Ok(()) => {}
            Err(TryPivotError::Pivot(PivotError::Final)) => self.state = DictState::Final,
            Err(TryPivotError::Pivot(PivotError::Unbounded)) => {
                self.state = DictState::Unbounded
            }
            Err(TryPivotError::LinAlg(e)) => return Err(e),
        }

        self.iterations += 1;
        callback.on_pivot(self.iterations);
        Ok(())
    }

    fn try_pivot(&mut self) -> Result<(), TryPivotError> {
        let pi = self.basis.solve_transpose(&self.c_b());
        let reduced = self.reduced_costs(&pi);

        let (enter_index, max_reduced) = argmax(&reduced);
        if max_reduced < self.options.pivot_tolerance {
            return Err(TryPivotError::Pivot(PivotError::Final));
        }

        let d = self.pivot_column(enter_index);
        let bhat = self.basis.solve(&self.b);

        let mut leave_index: Option<usize> = None;
        let mut best_ratio = f64::INFINITY;
        for i in 0..self.m {
            if d[i] < -self.options.pivot_tolerance {
                let ratio = -bhat[i] / d[i];
                let better = match leave_index {
                    None => true,
                    Some(cur) => {
                        if (ratio - best_ratio).abs() <= self.options.pivot_tolerance {
                            self.base[i] < self.base[cur]
                        } else {
                            ratio < best_ratio
                        }
                    }
                };
                if better {
                    best_ratio = ratio;
                    leave_index = Some(i);
                }
            }
        }

        let leave_index = match leave_index {
            Some(i) => i,
            None => return Err(TryPivotError::Pivot(PivotError::Unbounded)),
        };

        let entering_id = self.non_base[enter_index];
        let leaving_id = self.base[leave_index];
        self.non_base[enter_index] = leaving_id;
        self.base[leave_index] = entering_id;

        let eta_values = Col::from_fn(self.m, |i| -d[i]);
        self.basis
            .push_eta(EtaMatrix::new(leave_index, eta_values))
            .map_err(TryPivotError::LinAlg)?;

        Ok(())
    }

    /// `π·b + z`, where `π` solves `B^T π = c_B`.
    pub fn objective_value(&self) -> f64 {
        let pi = self.basis.solve_transpose(&self.c_b());
        dot(&pi, &self.b) + self.z
    }

    /// Valid once FINAL. Scatters `b̂ = B^{-1} b` into the first `n`
    /// structural positions via `base`.
    pub fn get_solution(&self) -> Solution {
        let bhat = self.basis.solve(&self.b);
        let mut x = vec![0.0; self.n];
        for (i, &g) in self.base.iter().enumerate() {
            if g < self.n {
                x[g] = bhat[i];
            }
        }
        Solution::new(self.objective_value(), x)
    }

    /// Exports the current dictionary as a [`Problem`] other code can branch on.
    #[allow(non_snake_case)]
    pub fn to_problem(&self) -> Problem {
        let pi = self.basis.solve_transpose(&self.c_b());
        let reduced = self.reduced_costs(&pi);

        let columns: Vec<Col<f64>> = (0..self.n).map(|j| self.pivot_column(j)).collect();
        let A = Mat::from_fn(self.m, self.n, |i, j| columns[j][i]);
        let b = self.basis.solve(&self.b);

        Problem {
            A,
            b,
            c: reduced,
            z: dot(&pi, &self.b) + self.z,
            base: self.base.clone(),
            non_base: self.non_base.clone(),
            dual: self.dual,
        }
    }
}
