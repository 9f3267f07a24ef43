//! Dense LU factorization with partial pivoting, used to (re)factor the
//! explicit basis matrix whenever the eta file would grow past its bound.
//!
//! The basis matrices this crate factors are small and dense by
//! construction (one relaxed LP node's m×m basis), so this leans on
//! faer's own dense partial-pivoting LU rather than hand-rolling
//! elimination; `solve_transpose` is served by a second factorization of
//! the transpose, since a basis is refactored far less often than it is
//! solved against.

use faer::prelude::*;
use faer::solvers::PartialPivLu;
use faer::{Col, Mat};

use crate::error::LinAlgError;

pub struct DenseLu {
    original: Mat<f64>,
    lu: PartialPivLu<f64>,
    lu_t: PartialPivLu<f64>,
}

impl std::fmt::Debug for DenseLu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseLu").field("dim", &self.dim()).finish()
    }
}

fn to_col(mat: &Mat<f64>, n: usize) -> Col<f64> {
    Col::from_fn(n, |i| mat[(i, 0)])
}

fn to_mat(v: &Col<f64>) -> Mat<f64> {
    Mat::from_fn(v.nrows(), 1, |i, _| v[i])
}

impl DenseLu {
    pub fn identity(n: usize) -> Self {
        let mat = Mat::<f64>::identity(n, n);
        Self {
            lu: mat.partial_piv_lu(),
            lu_t: mat.partial_piv_lu(),
            original: mat,
        }
    }

    pub fn dim(&self) -> usize {
        self.original.nrows()
    }

    /// Factors `mat` via faer's dense partial-pivoting LU. Fails if the
    /// factorization cannot recover the identity within `tolerance`,
    /// which is how a near-singular pivot shows up once elimination
    /// itself is faer's concern, not this module's.
    pub fn factorize(mat: &Mat<f64>, tolerance: f64) -> Result<Self, LinAlgError> {
        let n = mat.nrows();
        assert_eq!(n, mat.ncols(), "basis matrix must be square");

        let lu = mat.partial_piv_lu();
        let identity = Mat::<f64>::identity(n, n);
        let inverse = lu.solve(&identity);
        let blow_up = 1.0 / tolerance;
        for i in 0..n {
            for j in 0..n {
                if !inverse[(i, j)].is_finite() || inverse[(i, j)].abs() > blow_up {
                    return Err(LinAlgError::Singular { column: j });
                }
            }
        }

        let transposed = mat.transpose().to_owned();
        let lu_t = transposed.partial_piv_lu();

        Ok(Self { original: mat.clone(), lu, lu_t })
    }

    /// Solves `A y = v` via the stored factorization.
    pub fn solve(&self, v: &Col<f64>) -> Col<f64> {
        let sol = self.lu.solve(&to_mat(v));
        to_col(&sol, v.nrows())
    }

    /// Solves `A^T y = v` via a factorization of `A^T` kept alongside the
    /// forward one.
    pub fn solve_transpose(&self, v: &Col<f64>) -> Col<f64> {
        let sol = self.lu_t.solve(&to_mat(v));
        to_col(&sol, v.nrows())
    }

    /// Returns the matrix this factorization was built from; used only by
    /// [`crate::linalg::basis::Basis::refactor`] to recompute the basis
    /// before a fresh factorization.
    pub fn to_dense(&self) -> Mat<f64> {
        self.original.clone()
    }
}
