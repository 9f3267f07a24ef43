//! The dictionary's basis representation: `B = L U E_1 ... E_k`, combining a
//! dense LU pair with an ordered eta file.

use faer::Col;

use crate::error::LinAlgError;
use crate::linalg::dense_lu::DenseLu;
use crate::linalg::eta::EtaMatrix;

pub struct Basis {
    lu: DenseLu,
    etas: Vec<EtaMatrix>,
    max_eta: usize,
    tolerance: f64,
}

impl Basis {
    pub fn identity(m: usize, max_eta: usize, tolerance: f64) -> Self {
        Self {
            lu: DenseLu::identity(m),
            etas: Vec::new(),
            max_eta,
            tolerance,
        }
    }

    pub fn dim(&self) -> usize {
        self.lu.dim()
    }

    pub fn eta_len(&self) -> usize {
        self.etas.len()
    }

    /// Forward solve `B y = v`: `L`, then `U`, then each eta in order.
    pub fn solve(&self, v: &Col<f64>) -> Col<f64> {
        let mut w = self.lu.solve(v);
        for eta in &self.etas {
            w = eta.solve(&w);
        }
        w
    }

    /// Transposed solve `B^T y = v`: etas in reverse order, then `U^T`,
    /// then `L^T`.
    pub fn solve_transpose(&self, v: &Col<f64>) -> Col<f64> {
        let mut w = v.clone();
        for eta in self.etas.iter().rev() {
            w = eta.solve_transpose(&w);
        }
        self.lu.solve_transpose(&w)
    }

    /// Appends a new eta matrix for the most recent pivot, refactoring the
    /// explicit basis if the file would now exceed `max_eta`.
    pub fn push_eta(&mut self, eta: EtaMatrix) -> Result<(), LinAlgError> {
        self.etas.push(eta);
        if self.etas.len() > self.max_eta {
            self.refactor()?;
        }
        Ok(())
    }

    /// Recomputes the explicit basis `R = L U E_1 ... E_k`, LU-factors it
    /// fresh, and empties the eta file.
    fn refactor(&mut self) -> Result<(), LinAlgError> {
        let mut r = self.lu.to_dense();
        for eta in &self.etas {
            r = &r * &eta.to_dense();
        }
        self.lu = DenseLu::factorize(&r, self.tolerance)?;
        self.etas.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn identity_basis_solves_trivially() {
        let basis = Basis::identity(3, 30, 1e-10);
        let v = Col::from_fn(3, |i| [1.0, 2.0, 3.0][i]);
        assert_eq!(basis.solve(&v), v);
        assert_eq!(basis.solve_transpose(&v), v);
    }

    #[test]
    fn eta_updates_change_the_solve() {
        let mut basis = Basis::identity(2, 30, 1e-10);
        let eta = EtaMatrix::new(0, Col::from_fn(2, |i| [2.0, 1.0][i]));
        basis.push_eta(eta).unwrap();

        let v = Col::from_fn(2, |i| [4.0, 5.0][i]);
        let w = basis.solve(&v);
        // B = I * E, E column 0 = [2, 1]; B w = v => 2 w0 = v0, w1 + w0 = v1
        assert!((w[0] - 2.0).abs() < 1e-12);
        assert!((w[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn refactor_triggers_past_max_eta_and_preserves_solves() {
        let mut basis = Basis::identity(2, 2, 1e-10);
        for _ in 0..5 {
            let eta = EtaMatrix::new(0, Col::from_fn(2, |i| [1.0, 0.0][i]));
            basis.push_eta(eta).unwrap();
        }
        assert!(basis.eta_len() <= 2);

        let v = Col::from_fn(2, |i| [1.0, 1.0][i]);
        let w = basis.solve(&v);
        assert!((w[0] - 1.0).abs() < 1e-8);
        assert!((w[1] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn to_dense_round_trips_an_explicit_basis() {
        let a = Mat::from_fn(2, 2, |i, j| [[2.0, 0.0], [0.0, 2.0]][i][j]);
        let lu = DenseLu::factorize(&a, 1e-10).unwrap();
        let basis = Basis {
            lu,
            etas: Vec::new(),
            max_eta: 30,
            tolerance: 1e-10,
        };
        let v = Col::from_fn(2, |i| [2.0, 4.0][i]);
        let w = basis.solve(&v);
        assert!((w[0] - 1.0).abs() < 1e-10);
        assert!((w[1] - 2.0).abs() < 1e-10);
    }
}
