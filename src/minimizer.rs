//! This module provides the base framework for the minimizers in this crate, such as the
//! base trait and return type.
use ndarray::prelude::*;
use num_traits::Float;

use crate::error::SearchError;

/// Minimizer states at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The step size dropped to or below the tolerance.
    Converged,
    /// The iteration cap was hit while the step size was still above the tolerance.
    MaxIterReached,
}

/// A minimization result, storing various details of the run and the final results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    /// The point where the smallest value was found. Always a fresh array,
    /// the caller's starting point is left untouched.
    pub minimum: Array1<T>,
    /// The function value at `minimum`.
    pub minimum_value: T,
    /// The number of completed poll rounds.
    pub iterations: usize,
    /// The number of function evaluations performed.
    pub f_evals: usize,
    /// The step size when the run stopped.
    pub step_size: T,
    /// The minimizer success or failure status.
    pub status: Status,
}

/// Converts an `f64` constant into the scalar type of a search.
///
/// `NumCast` between floating point types only fails for finite values
/// outside the target's range. The constants this crate uses are all well
/// inside the range of `f32`, so the conversion cannot fail.
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).expect("finite f64 constants convert to every Float type")
}

/// A general minimizer trait.
pub trait Minimizer<T: Float> {
    /// Minimizes `func` by exploring the parameter space around `x0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` or the minimizer configuration is rejected
    /// before the search starts.
    fn minimize<F>(&self, func: F, x0: ArrayView1<T>) -> Result<SearchResult<T>, SearchError>
    where
        F: Fn(ArrayView1<T>) -> T + Sync;
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn constants() {
        assert_eq!(constant::<f64>(1e-10), 1e-10);
        assert_eq!(constant::<f32>(1e-10), 1e-10f64 as f32);
        assert_eq!(constant::<f32>(100.0), 100.0f32);
    }
}
