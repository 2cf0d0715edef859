//! Compass search, also known as coordinate pattern search.
//!
//! Every iteration probes the current point along each coordinate axis, once
//! in the positive and once in the negative direction, at distance `delta`:
//!
//! ```text
//!          x + δe₁
//!             |
//! x - δe₀ --- x --- x + δe₀
//!             |
//!          x - δe₁
//! ```
//!
//! If the best of these 2n polls beats the current minimum, the point moves
//! there and `delta` is kept. Otherwise `delta` is reduced. The search stops
//! once `delta` drops to or below the tolerance.
//!
//! # Use case
//!
//! Compass search needs neither a gradient nor a hessian and costs 2n function
//! evaluations per iteration. The sequence of minima never increases, and on
//! smooth functions the search settles on a local minimum (or another
//! stationary point). There is no global optimality guarantee, see
//! [`MultiStart`](super::MultiStart) for running many searches at once.
//!
//! # Examples
//!
//! ```
//! # extern crate ndarray;
//! # extern crate compass_search;
//! # use ndarray::prelude::*;
//! # use compass_search::vector::CompassSearchBuilder;
//!
//! let function =
//!     |x: ArrayView1<f64>| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2);
//! let minimizer = CompassSearchBuilder::default()
//!     .tolerance(1e-10)
//!     .build()
//!     .unwrap();
//! let args = Array::from_vec(vec![5.0, 5.0]);
//! let res = minimizer.minimize(&function, args.view()).unwrap();
//! println!("res: {}", res.minimum);
//! ```

use ndarray::prelude::*;
use num_traits::Float;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::minimizer::{constant, Minimizer, SearchResult, Status};

/// A snapshot handed to the observer of [`CompassSearch::minimize_observed`]
/// after every poll round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Round<T> {
    /// One-based number of the round that just completed.
    pub iteration: usize,
    /// The step size the polls of this round were taken with.
    pub step_size: T,
    /// The minimum after this round.
    pub minimum_value: T,
    /// Index into the poll set of the accepted probe, `None` if the step
    /// size was reduced instead. Even indices increase coordinate `idx / 2`,
    /// odd indices decrease it.
    pub accepted: Option<usize>,
}

#[derive(Builder, Debug, Clone)]
/// A minimizer for a scalar function of one or more variables using compass search.
pub struct CompassSearch<T: Float> {
    /// Initial distance of every probe from the current point.
    #[builder(default = "T::one()")]
    pub step_size: T,

    /// The search terminates once the step size is at or below this value.
    /// Smaller is more precise.
    #[builder(default = "constant(1e-10)")]
    pub tolerance: T,

    /// Factor the step size is multiplied by after a round without improvement.
    #[builder(default = "T::one() / (T::one() + T::one())")]
    pub reduction: T,

    /// The maximum number of poll rounds. Unlimited by default, in which case
    /// only the step size ends the search.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub max_iter: Option<usize>,

    /// Evaluate the polls of a round on the rayon thread pool. Results are
    /// identical to the sequential search.
    #[builder(default = "false")]
    pub parallel: bool,
}

impl<T: Float> Default for CompassSearch<T> {
    fn default() -> Self {
        CompassSearch {
            step_size: T::one(),
            tolerance: constant(1e-10),
            reduction: T::one() / (T::one() + T::one()),
            max_iter: None,
            parallel: false,
        }
    }
}

impl<T> CompassSearch<T>
where
    T: Float + Send + Sync,
{
    /// Search for the value minimizing `func` starting at `x0`. The algorithm
    /// explores the variable space without constraints. `x0` is copied, never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty, the configuration could not
    /// terminate, or `func` is not finite at `x0`.
    pub fn minimize<F>(&self, func: F, x0: ArrayView1<T>) -> Result<SearchResult<T>, SearchError>
    where
        F: Fn(ArrayView1<T>) -> T + Sync,
    {
        self.minimize_observed(func, x0, |_| {})
    }

    /// Same as [`minimize`](Self::minimize), calling `observer` after every
    /// poll round.
    ///
    /// # Errors
    ///
    /// See [`minimize`](Self::minimize).
    pub fn minimize_observed<F, O>(
        &self,
        func: F,
        x0: ArrayView1<T>,
        mut observer: O,
    ) -> Result<SearchResult<T>, SearchError>
    where
        F: Fn(ArrayView1<T>) -> T + Sync,
        O: FnMut(&Round<T>),
    {
        self.validate(x0)?;

        let n = x0.len();
        let mut x = x0.to_owned();
        let mut delta = self.step_size;
        let mut min = func(x.view());
        if !min.is_finite() {
            return Err(SearchError::NonFiniteObjective);
        }

        debug!(
            dimension = n,
            step_size = delta.to_f64(),
            tolerance = self.tolerance.to_f64(),
            initial_value = min.to_f64(),
            "starting compass search"
        );

        let mut polls = Array1::<T>::zeros(2 * n);
        let mut iterations = 0;

        while delta > self.tolerance && !self.out_of_iterations(iterations) {
            self.poll(&func, &x, delta, &mut polls);

            let accepted = match best_poll(polls.view()) {
                Some((idx, value)) if value < min => {
                    min = value;
                    if idx % 2 == 0 {
                        x[idx / 2] = x[idx / 2] + delta;
                    } else {
                        x[idx / 2] = x[idx / 2] - delta;
                    }
                    Some(idx)
                }
                _ => None,
            };

            iterations += 1;
            let round = Round {
                iteration: iterations,
                step_size: delta,
                minimum_value: min,
                accepted,
            };
            trace!(
                iteration = iterations,
                step_size = delta.to_f64(),
                minimum_value = min.to_f64(),
                accepted = ?accepted,
                "poll round"
            );
            observer(&round);

            if accepted.is_none() {
                delta = delta * self.reduction;
            }
        }

        let status = if delta > self.tolerance {
            Status::MaxIterReached
        } else {
            Status::Converged
        };

        debug!(
            iterations,
            minimum_value = min.to_f64(),
            status = ?status,
            "compass search finished"
        );

        Ok(SearchResult {
            minimum: x,
            minimum_value: min,
            iterations,
            f_evals: 1 + 2 * n * iterations,
            step_size: delta,
            status,
        })
    }

    /// Rejects inputs for which the loop would be undefined or never end.
    fn validate(&self, x0: ArrayView1<T>) -> Result<(), SearchError> {
        if x0.is_empty() {
            return Err(SearchError::InvalidDimension);
        }
        if !self.step_size.is_finite() || self.step_size <= T::zero() {
            return Err(SearchError::StepSize);
        }
        if !self.tolerance.is_finite() || self.tolerance <= T::zero() {
            return Err(SearchError::Tolerance);
        }
        if !(self.reduction > T::zero() && self.reduction < T::one()) {
            return Err(SearchError::Reduction);
        }
        Ok(())
    }

    #[inline]
    fn out_of_iterations(&self, iterations: usize) -> bool {
        self.max_iter.map_or(false, |max| iterations >= max)
    }

    /// Fill `polls` with the values at `x ± delta` along every axis. Slot `2i`
    /// holds the increase of coordinate `i`, slot `2i + 1` the decrease.
    fn poll<F>(&self, func: &F, x: &Array1<T>, delta: T, polls: &mut Array1<T>)
    where
        F: Fn(ArrayView1<T>) -> T + Sync,
    {
        if self.parallel {
            let values: Vec<T> = (0..polls.len())
                .into_par_iter()
                .map(|idx| {
                    let mut probe = x.clone();
                    probe[idx / 2] = if idx % 2 == 0 {
                        x[idx / 2] + delta
                    } else {
                        x[idx / 2] - delta
                    };
                    func(probe.view())
                })
                .collect();
            polls.assign(&Array1::from(values));
        } else {
            let mut probe = x.clone();
            for i in 0..x.len() {
                probe[i] = x[i] + delta;
                polls[2 * i] = func(probe.view());
                probe[i] = x[i] - delta;
                polls[2 * i + 1] = func(probe.view());
                probe[i] = x[i];
            }
        }
    }
}

impl<T> Minimizer<T> for CompassSearch<T>
where
    T: Float + Send + Sync,
{
    fn minimize<F>(&self, func: F, x0: ArrayView1<T>) -> Result<SearchResult<T>, SearchError>
    where
        F: Fn(ArrayView1<T>) -> T + Sync,
    {
        CompassSearch::minimize(self, func, x0)
    }
}

/// Index and value of the smallest finite poll. Ties go to the lowest index.
/// NaN and infinite polls are never selected.
fn best_poll<T: Float>(polls: ArrayView1<T>) -> Option<(usize, T)> {
    polls
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .fold(None, |best, (idx, &value)| match best {
            Some((_, current)) if current <= value => best,
            _ => Some((idx, value)),
        })
}
