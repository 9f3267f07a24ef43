//! Random test-fixture Problems for the CLI and the scenario tests.
//! Uses `faer::rand`'s `StdRng`, the same RNG this family of crates uses
//! in its own randomized test fixtures, seeded for reproducibility.

use faer::rand::rngs::StdRng;
use faer::rand::{Rng, SeedableRng};
use faer::{Col, Mat};

use crate::problem::Problem;

/// Generates a `rows`×`cols` Problem from `seed`.
///
/// `A` entries are drawn uniformly from `[-10, 10)` then zeroed with
/// probability 2/3; `b` entries from `[1, 10)`; `c` entries from
/// `[-10, 10)`, except the first `ceil(cols/3)` columns, which are forced
/// non-negative (`[0, 10)`) so every instance has at least that many
/// columns worth entering the initial dictionary.
#[allow(non_snake_case)]
pub fn generate(rows: usize, cols: usize, seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    let forced_nonneg = cols.div_ceil(3);

    let mut a_values = vec![0.0; rows * cols];
    for entry in a_values.iter_mut() {
        let value = rng.gen_range(-10.0..10.0);
        *entry = if rng.gen_bool(2.0 / 3.0) { 0.0 } else { value };
    }
    let A = Mat::from_fn(rows, cols, |i, j| a_values[i * cols + j]);

    let mut b_values = vec![0.0; rows];
    for entry in b_values.iter_mut() {
        *entry = rng.gen_range(1.0..10.0);
    }
    let b = Col::from_fn(rows, |i| b_values[i]);

    let mut c_values = vec![0.0; cols];
    for (j, entry) in c_values.iter_mut().enumerate() {
        *entry = if j < forced_nonneg {
            rng.gen_range(0.0..10.0)
        } else {
            rng.gen_range(-10.0..10.0)
        };
    }
    let c = Col::from_fn(cols, |j| c_values[j]);

    Problem::new(A, b, c)
}
