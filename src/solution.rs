//! The value a dictionary or a branch-and-bound search yields.

use std::fmt;

/// A relaxed (possibly fractional) or integral solution to one LP node.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub objective: f64,
    pub x: Vec<f64>,
}

impl Solution {
    pub fn new(objective: f64, x: Vec<f64>) -> Self {
        Self { objective, x }
    }

    /// True if every structural value is within `tolerance` of an integer.
    ///
    /// Implemented by comparing `floor(v - tolerance)` against
    /// `floor(v + tolerance)`: a value that is genuinely integral (or within
    /// `tolerance` of one) floors identically on both sides of the
    /// tolerance band; a value that straddles an integer boundary does not.
    pub fn is_integral(&self, tolerance: f64) -> bool {
        self.x
            .iter()
            .all(|&v| (v - tolerance).floor() == (v + tolerance).floor())
    }

    /// Index of the structural variable farthest from an integer, used by
    /// the brancher to choose a branching row. `None` if `x` is empty.
    pub fn most_fractional(&self, tolerance: f64) -> Option<usize> {
        self.x
            .iter()
            .enumerate()
            .filter(|(_, &v)| (v - tolerance).floor() != (v + tolerance).floor())
            .max_by(|(_, a), (_, b)| fractional_part(**a).total_cmp(&fractional_part(**b)))
            .map(|(i, _)| i)
    }
}

fn fractional_part(v: f64) -> f64 {
    let f = v - v.floor();
    (f - 0.5).abs()
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Solution(objective={}, x={:?})", self.objective, self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_solution_is_detected() {
        let sol = Solution::new(10.0, vec![1.0, 2.0, 3.0]);
        assert!(sol.is_integral(1e-8));
    }

    #[test]
    fn near_integral_within_tolerance_is_integral() {
        let sol = Solution::new(10.0, vec![1.0 + 1e-9, 2.0 - 1e-9]);
        assert!(sol.is_integral(1e-8));
    }

    #[test]
    fn fractional_solution_is_not_integral() {
        let sol = Solution::new(10.0, vec![1.5, 2.0]);
        assert!(!sol.is_integral(1e-8));
    }

    #[test]
    fn most_fractional_picks_the_farthest_from_an_integer() {
        let sol = Solution::new(0.0, vec![1.0, 2.5, 3.1]);
        assert_eq!(sol.most_fractional(1e-8), Some(1));
    }

    #[test]
    fn most_fractional_is_none_for_an_integral_solution() {
        let sol = Solution::new(0.0, vec![1.0, 2.0]);
        assert_eq!(sol.most_fractional(1e-8), None);
    }
}
