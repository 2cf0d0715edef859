//! Derivative-free minimization by compass search.
//!
//! [`vector::CompassSearch`] walks a starting point toward a local minimum by
//! probing every coordinate axis in both directions and shrinking the probe
//! distance whenever no probe improves. [`vector::MultiStart`] runs many such
//! searches concurrently and keeps the best one.
//!
//! ```
//! # extern crate ndarray;
//! # extern crate compass_search;
//! # use ndarray::prelude::*;
//! use compass_search::objectives::rosenbrock;
//! use compass_search::vector::CompassSearchBuilder;
//!
//! let minimizer = CompassSearchBuilder::default().build().unwrap();
//! let res = minimizer.minimize(rosenbrock, arr1(&[5.0f64, 5.0]).view()).unwrap();
//! assert!((res.minimum[0] - 1.0).abs() < 1e-4);
//! ```

#[macro_use]
extern crate derive_builder;

pub mod error;
pub mod minimizer;
pub mod objectives;
pub mod vector;

pub use error::SearchError;
pub use minimizer::{Minimizer, SearchResult, Status};
