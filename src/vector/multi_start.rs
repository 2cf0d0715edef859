//! Multi-start search: run many independent local searches from different
//! starting points and keep the best result.
//!
//! A local method such as [`CompassSearch`] only finds the minimum closest to
//! where it starts. Starting from many points raises the chance that one of
//! them lands in the basin of the global minimum. The runs share nothing and
//! are fanned out over the rayon thread pool. The winner is chosen only after
//! every run has finished.
//!
//! # Examples
//!
//! ```
//! # extern crate ndarray;
//! # extern crate rand;
//! # extern crate compass_search;
//! # use ndarray::prelude::*;
//! # use rand::SeedableRng;
//! # use compass_search::vector::{sample_starts, MultiStartBuilder};
//!
//! // Two basins, the deeper one around x = -2.
//! let function = |x: ArrayView1<f64>| (x[0] * x[0] - 4.0).powi(2) + x[0];
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let starts = sample_starts(&[(-5.0, 5.0)], 16, &mut rng).unwrap();
//!
//! let multi = MultiStartBuilder::default().build().unwrap();
//! let res = multi.minimize(&function, &starts).unwrap();
//! println!("best of {}: {}", res.runs.len(), res.best.minimum);
//! ```

use ndarray::prelude::*;
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::compass::CompassSearch;
use crate::error::SearchError;
use crate::minimizer::{Minimizer, SearchResult};

/// The outcome of a multi-start search.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartResult<T> {
    /// The run with the lowest minimum value.
    pub best: SearchResult<T>,
    /// Index of `best` in the starting points.
    pub best_index: usize,
    /// Every run, in the order of the starting points.
    pub runs: Vec<SearchResult<T>>,
}

#[derive(Builder, Debug, Clone)]
/// Runs one local search per starting point.
pub struct MultiStart<T: Float> {
    /// The local search every start is handed to.
    #[builder(default = "CompassSearch::default()")]
    pub search: CompassSearch<T>,

    /// Run the searches concurrently on the rayon thread pool.
    #[builder(default = "true")]
    pub parallel: bool,
}

impl<T> MultiStart<T>
where
    T: Float + Send + Sync,
{
    /// Search for the minimum of `func` from every point in `starts` and
    /// return the best run. Ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoStartingPoints`] if `starts` is empty, and
    /// otherwise the error of the first start that was rejected.
    pub fn minimize<F>(
        &self,
        func: F,
        starts: &[Array1<T>],
    ) -> Result<MultiStartResult<T>, SearchError>
    where
        F: Fn(ArrayView1<T>) -> T + Sync,
    {
        if starts.is_empty() {
            return Err(SearchError::NoStartingPoints);
        }

        let run = |(k, x0): (usize, &Array1<T>)| {
            let res = Minimizer::minimize(&self.search, &func, x0.view());
            if let Ok(ref r) = res {
                debug!(
                    start = k,
                    iterations = r.iterations,
                    minimum_value = r.minimum_value.to_f64(),
                    "multi-start run finished"
                );
            }
            res
        };

        let results: Vec<Result<SearchResult<T>, SearchError>> = if self.parallel {
            starts.par_iter().enumerate().map(run).collect()
        } else {
            starts.iter().enumerate().map(run).collect()
        };
        let runs = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let mut best_index = 0;
        for (k, r) in runs.iter().enumerate().skip(1) {
            if r.minimum_value < runs[best_index].minimum_value {
                best_index = k;
            }
        }

        info!(
            starts = runs.len(),
            best_index,
            minimum_value = runs[best_index].minimum_value.to_f64(),
            "multi-start search finished"
        );

        Ok(MultiStartResult {
            best: runs[best_index].clone(),
            best_index,
            runs,
        })
    }
}

/// Draw `count` starting points uniformly from the box given by `bounds`, one
/// `(low, high)` pair per dimension.
///
/// # Errors
///
/// Returns an error if `bounds` is empty or any pair is non-finite, has
/// `low > high`, or spans a width that overflows.
pub fn sample_starts<T, R>(
    bounds: &[(T, T)],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Array1<T>>, SearchError>
where
    T: Float + SampleUniform,
    R: Rng + ?Sized,
{
    if bounds.is_empty() {
        return Err(SearchError::InvalidDimension);
    }
    for (dimension, &(low, high)) in bounds.iter().enumerate() {
        if !low.is_finite() || !high.is_finite() || low > high || !(high - low).is_finite() {
            return Err(SearchError::InvalidBounds { dimension });
        }
    }

    let starts = (0..count)
        .map(|_| {
            bounds
                .iter()
                .map(|&(low, high)| rng.gen_range(low..=high))
                .collect::<Array1<T>>()
        })
        .collect();
    Ok(starts)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::objectives::{paraboloid, rosenbrock};
    use crate::vector::CompassSearchBuilder;
    use float_cmp::approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Two basins: a shallow one near x = 2 and a deeper one near x = -2.
    fn double_well(x: ArrayView1<f64>) -> f64 {
        (x[0] * x[0] - 4.0).powi(2) + x[0]
    }

    #[test]
    fn picks_the_deeper_basin() {
        let multi = MultiStartBuilder::default().build().unwrap();
        let starts = vec![arr1(&[3.0]), arr1(&[-3.0]), arr1(&[1.0])];
        let res = multi.minimize(double_well, &starts).unwrap();

        assert_eq!(res.runs.len(), 3);
        assert_eq!(res.best_index, 1);
        assert!(res.best.minimum[0] < 0.0);
        assert!(res.runs[0].minimum[0] > 0.0);
        assert_eq!(res.best, res.runs[1]);
    }

    #[test]
    fn runs_match_single_searches() {
        let search = CompassSearchBuilder::default().build().unwrap();
        let multi = MultiStartBuilder::default()
            .search(search.clone())
            .build()
            .unwrap();
        let starts = vec![arr1(&[5.0, 5.0]), arr1(&[-2.0, 3.0])];
        let res = multi.minimize(rosenbrock, &starts).unwrap();

        for (x0, run) in starts.iter().zip(res.runs.iter()) {
            assert_eq!(*run, search.minimize(rosenbrock, x0.view()).unwrap());
        }
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let multi = MultiStartBuilder::default().build().unwrap();
        let starts = vec![arr1(&[2.0, 0.0]), arr1(&[-2.0, 0.0]), arr1(&[0.0, 2.0])];
        let res = multi.minimize(paraboloid, &starts).unwrap();

        assert_eq!(res.best.minimum_value, 0.0);
        assert_eq!(res.best_index, 0);
    }

    #[test]
    fn sequential_matches_parallel() {
        let starts = vec![arr1(&[3.0]), arr1(&[-0.5]), arr1(&[-4.0]), arr1(&[0.7])];
        let par = MultiStartBuilder::default().build().unwrap();
        let seq = MultiStartBuilder::default().parallel(false).build().unwrap();

        assert_eq!(
            par.minimize(double_well, &starts).unwrap(),
            seq.minimize(double_well, &starts).unwrap()
        );
    }

    #[test]
    fn sampled_starts() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = [(-5.0, 5.0), (0.0, 1.0)];
        let starts = sample_starts(&bounds, 20, &mut rng).unwrap();

        assert_eq!(starts.len(), 20);
        for x in &starts {
            assert_eq!(x.len(), 2);
            assert!((-5.0..=5.0).contains(&x[0]));
            assert!((0.0..=1.0).contains(&x[1]));
        }

        let mut again = StdRng::seed_from_u64(42);
        assert_eq!(starts, sample_starts(&bounds, 20, &mut again).unwrap());

        let multi = MultiStartBuilder::default().build().unwrap();
        let res = multi.minimize(rosenbrock, &starts).unwrap();
        assert!(approx_eq!(f64, res.best.minimum[0], 1.0, epsilon = 1e-4));
        assert!(approx_eq!(f64, res.best.minimum[1], 1.0, epsilon = 1e-4));
    }

    #[test]
    fn rejects_invalid_input() {
        let multi: MultiStart<f64> = MultiStartBuilder::default().build().unwrap();
        assert_eq!(
            multi.minimize(paraboloid, &[]),
            Err(SearchError::NoStartingPoints)
        );

        let starts = vec![arr1(&[1.0, 1.0]), Array1::zeros(0)];
        assert_eq!(
            multi.minimize(paraboloid, &starts),
            Err(SearchError::InvalidDimension)
        );

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_starts(&[(0.0, 1.0), (2.0, 1.0)], 3, &mut rng),
            Err(SearchError::InvalidBounds { dimension: 1 })
        );
        assert_eq!(
            sample_starts(&[(f64::NEG_INFINITY, 1.0)], 3, &mut rng),
            Err(SearchError::InvalidBounds { dimension: 0 })
        );
        assert_eq!(
            sample_starts(&[(0.0, 1.0), (f64::MIN, f64::MAX)], 2, &mut rng),
            Err(SearchError::InvalidBounds { dimension: 1 })
        );
        assert_eq!(
            sample_starts::<f64, _>(&[], 3, &mut rng),
            Err(SearchError::InvalidDimension)
        );
    }
}
