//! Eta matrices: identity matrices modified in exactly one column, used to
//! represent basis changes accumulated between LU refactors.

use faer::{Col, Mat};

/// An eta matrix `E`, equal to the identity except in column `column`,
/// which holds `values`.
#[derive(Debug, Clone)]
pub struct EtaMatrix {
    column: usize,
    values: Col<f64>,
}

impl EtaMatrix {
    pub fn new(column: usize, values: Col<f64>) -> Self {
        Self { column, values }
    }

    fn dim(&self) -> usize {
        self.values.nrows()
    }

    /// Solves `E w = v` in O(m) by substitution into the spike column.
    pub fn solve(&self, v: &Col<f64>) -> Col<f64> {
        let k = self.column;
        let wk = v[k] / self.values[k];
        Col::from_fn(v.nrows(), |i| {
            if i == k { wk } else { v[i] - self.values[i] * wk }
        })
    }

    /// Solves `E^T y = v` in O(m). `E^T` is the identity with row `column`
    /// replaced by `values`, so every entry but `y[column]` is read off
    /// directly from `v`.
    pub fn solve_transpose(&self, v: &Col<f64>) -> Col<f64> {
        let k = self.column;
        let mut dot = 0.0;
        for j in 0..v.nrows() {
            if j != k {
                dot += self.values[j] * v[j];
            }
        }
        let yk = (v[k] - dot) / self.values[k];
        Col::from_fn(v.nrows(), |i| if i == k { yk } else { v[i] })
    }

    /// Materializes this eta matrix densely; used only during refactor's
    /// explicit-product recomputation.
    pub fn to_dense(&self) -> Mat<f64> {
        let m = self.dim();
        Mat::from_fn(m, m, |i, j| {
            if j == self.column {
                self.values[i]
            } else if i == j {
                1.0
            } else {
                0.0
            }
        })
    }
}
