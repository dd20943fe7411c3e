//! Dense vector helpers
//!
//! Small O(n) kernels used next to the tridiagonal solver: the scaled
//! vector addition `y + a·x` and the norms used to measure residuals.

use crate::error::{Result, check_len};
use crate::traits::ComplexField;
use ndarray::Array1;
use num_traits::{Float, Zero};

/// Compute axpy in place: y = α * x + y
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
#[inline]
pub fn axpy<T: ComplexField>(alpha: T, x: &Array1<T>, y: &mut Array1<T>) {
    assert_eq!(x.len(), y.len(), "Vector lengths must match for axpy");
    for (xi, yi) in x.iter().zip(y.iter_mut()) {
        *yi += alpha * *xi;
    }
}

/// Scaled vector addition: returns `y + a·x`.
///
/// Unrelated to the band structure; fails with `DimensionMismatch` when the
/// two vectors differ in length.
pub fn scaled_add<T: ComplexField>(a: T, x: &Array1<T>, y: &Array1<T>) -> Result<Array1<T>> {
    check_len(y.len(), x.len())?;
    let mut out = y.clone();
    axpy(a, x, &mut out);
    Ok(out)
}

/// Compute vector 2-norm: ||x||_2 = sqrt(Σ |x_i|^2)
#[inline]
pub fn vector_norm<T: ComplexField>(x: &Array1<T>) -> T::Real {
    x.iter()
        .map(|xi| xi.norm_sqr())
        .fold(T::Real::zero(), |acc, v| acc + v)
        .sqrt()
}

/// Infinity norm: max_i |x_i| (zero for an empty vector)
#[inline]
pub fn max_norm<T: ComplexField>(x: &Array1<T>) -> T::Real {
    x.iter()
        .map(|xi| xi.norm())
        .fold(T::Real::zero(), Float::max)
}
