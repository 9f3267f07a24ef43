//! The relaxed-LP node carrier passed between the search driver, the
//! [`crate::solver`], and the [`crate::brancher`].

use std::fmt;

use faer::{Col, Mat};

/// A single branch-and-bound node's relaxed linear program, in the
/// `A x {=,≤} b`, structural/slack split described in the data model.
///
/// `A` is m×n, `b` has length m, `c` has length n. `base`/`non_base`
/// partition `[0, m+n)` and identify which of the m+n structural-plus-slack
/// variables are currently basic.
#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct Problem {
    pub A: Mat<f64>,
    pub b: Col<f64>,
    pub c: Col<f64>,
    pub z: f64,
    pub base: Vec<usize>,
    pub non_base: Vec<usize>,
    pub dual: bool,
}

impl Problem {
    #[allow(non_snake_case)]
    pub fn new(A: Mat<f64>, b: Col<f64>, c: Col<f64>) -> Self {
        let m = A.nrows();
        let n = A.ncols();
        Self {
            A,
            b,
            c,
            z: 0.0,
            base: (n..n + m).collect(),
            non_base: (0..n).collect(),
            dual: false,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.A.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.A.ncols()
    }

    /// Produces the dual of this problem: `A' = -A^T`, `b' = -c`, `c' = -b`,
    /// `z' = -z`, `base`/`non_base` swapped, `dual` flag toggled.
    ///
    /// Applying this twice returns a problem structurally equal to the
    /// original (see the dual-of-dual property test in this module).
    pub fn dual(&self) -> Problem {
        let A = (-self.A.transpose()).to_owned();
        Problem {
            A,
            b: -&self.c,
            c: -&self.b,
            z: -self.z,
            base: self.non_base.clone(),
            non_base: self.base.clone(),
            dual: !self.dual,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Problem({} rows x {} cols, z={}, dual={})",
            self.n_rows(),
            self.n_cols(),
            self.z,
            self.dual
        )?;
        writeln!(f, "  base:     {:?}", self.base)?;
        writeln!(f, "  non_base: {:?}", self.non_base)
    }
}
