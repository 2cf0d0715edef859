//! Reference objective functions with known minima, used for self-tests and
//! the demonstration binary.

use ndarray::prelude::*;
use num_traits::Float;

use crate::minimizer::constant;

/// `x0² + x1²`. Convex, global minimum 0 at the origin.
///
/// Panics if `x` has fewer than two elements.
pub fn paraboloid<T: Float>(x: ArrayView1<T>) -> T {
    x[0] * x[0] + x[1] * x[1]
}

/// `100 (x1 - x0²)² + (1 - x0)²`. Non-convex, global minimum 0 at `(1, 1)`.
///
/// Panics if `x` has fewer than two elements.
pub fn rosenbrock<T: Float>(x: ArrayView1<T>) -> T {
    let hundred: T = constant(100.0);
    let valley = x[1] - x[0] * x[0];
    let slope = T::one() - x[0];
    hundred * valley * valley + slope * slope
}

/// The one-dimensional parabola `(x0 - center)²`.
pub fn shifted_parabola<T: Float>(center: T) -> impl Fn(ArrayView1<T>) -> T + Sync + Copy
where
    T: Sync,
{
    move |x: ArrayView1<T>| (x[0] - center).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_minima() {
        assert_eq!(paraboloid(arr1(&[0.0, 0.0]).view()), 0.0);
        assert_eq!(rosenbrock(arr1(&[1.0, 1.0]).view()), 0.0);
        assert_eq!(shifted_parabola(3.0)(arr1(&[3.0]).view()), 0.0);
    }

    #[test]
    fn rosenbrock_values() {
        // 100 * (5 - 25)^2 + (1 - 5)^2
        assert_eq!(rosenbrock(arr1(&[5.0, 5.0]).view()), 40016.0);
        assert_eq!(rosenbrock(arr1(&[0.0f32, 0.0]).view()), 1.0f32);
    }
}
