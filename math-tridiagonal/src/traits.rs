//! Core traits for the tridiagonal solver
//!
//! This module defines the abstractions the rest of the crate is generic over:
//! - [`ComplexField`]: Trait for scalar types (complex and real numbers)
//! - [`LinearOperator`]: Trait for matrix-like objects that can perform matrix-vector products
//! - [`Preconditioner`]: Trait for objects that approximate the action of A^(-1)

use ndarray::Array1;
use num_complex::{Complex32, Complex64};
use num_traits::{Float, NumAssign, One, ToPrimitive, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Trait for scalar types that can be stored in a tridiagonal matrix.
///
/// This trait abstracts over real and complex number types, providing
/// a unified interface for magnitudes (used to rank pivots), conjugation
/// and reciprocal magnitudes.
///
/// # Implementations
///
/// Provided for:
/// - `f64` and `f32` (real-valued problems)
/// - `Complex64` and `Complex32` (e.g. frequency-domain discretizations)
pub trait ComplexField:
    NumAssign + Clone + Copy + Send + Sync + Debug + Zero + One + Neg<Output = Self> + 'static
{
    /// The real number type underlying this field
    type Real: Float + NumAssign + ToPrimitive + Send + Sync + Debug + 'static;

    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Magnitude |z|
    fn norm(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }

    /// Reciprocal of the magnitude, 1/|z|.
    ///
    /// Returns `+inf` for zero instead of failing, so pivot bookkeeping can
    /// carry on through a singular matrix.
    fn reciprocal_norm(&self) -> Self::Real {
        let magnitude = self.norm();
        if magnitude.is_zero() {
            Self::Real::infinity()
        } else {
            magnitude.recip()
        }
    }

    /// Real part
    fn re(&self) -> Self::Real;

    /// Imaginary part
    fn im(&self) -> Self::Real;

    /// True when both parts are finite
    fn is_finite(&self) -> bool {
        self.re().is_finite() && self.im().is_finite()
    }
}

impl ComplexField for Complex64 {
    type Real = f64;

    #[inline]
    fn conj(&self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn re(&self) -> f64 {
        self.re
    }

    #[inline]
    fn im(&self) -> f64 {
        self.im
    }
}

impl ComplexField for Complex32 {
    type Real = f32;

    #[inline]
    fn conj(&self) -> Self {
        Complex32::conj(self)
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn norm(&self) -> f32 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn re(&self) -> f32 {
        self.re
    }

    #[inline]
    fn im(&self) -> f32 {
        self.im
    }
}

impl ComplexField for f64 {
    type Real = f64;

    #[inline]
    fn conj(&self) -> Self {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f64 {
        *self * *self
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn re(&self) -> f64 {
        *self
    }

    #[inline]
    fn im(&self) -> f64 {
        0.0
    }
}

impl ComplexField for f32 {
    type Real = f32;

    #[inline]
    fn conj(&self) -> Self {
        *self
    }

    #[inline]
    fn norm_sqr(&self) -> f32 {
        *self * *self
    }

    #[inline]
    fn norm(&self) -> f32 {
        self.abs()
    }

    #[inline]
    fn re(&self) -> f32 {
        *self
    }

    #[inline]
    fn im(&self) -> f32 {
        0.0
    }
}

/// Trait for linear operators (matrices) that can perform matrix-vector products.
///
/// Lets a [`crate::TridiagonalMatrix`] be handed to any code written against
/// matrix-free operators.
pub trait LinearOperator<T: ComplexField>: Send + Sync {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Array1<T>) -> Array1<T>;

    /// Apply the transpose: y = A^T * x
    fn apply_transpose(&self, x: &Array1<T>) -> Array1<T>;

    /// Apply the Hermitian (conjugate transpose): y = A^H * x
    fn apply_hermitian(&self, x: &Array1<T>) -> Array1<T> {
        // conj(A^T * conj(x))
        let x_conj = x.mapv(|v| v.conj());
        self.apply_transpose(&x_conj).mapv(|v| v.conj())
    }

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

/// Trait for preconditioners used in iterative solvers.
///
/// A preconditioner M approximates A^(-1). An exact tridiagonal factorization
/// is a natural preconditioner for systems dominated by a three-point stencil.
pub trait Preconditioner<T: ComplexField>: Send + Sync {
    /// Apply the preconditioner: y = M * r
    ///
    /// This should approximate solving A * y = r
    fn apply(&self, r: &Array1<T>) -> Array1<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_complex64_field() {
        let z = Complex64::new(3.0, 4.0);
        assert_relative_eq!(z.norm_sqr(), 25.0);
        assert_relative_eq!(ComplexField::norm(&z), 5.0);

        let z_conj = ComplexField::conj(&z);
        assert_relative_eq!(z_conj.re, 3.0);
        assert_relative_eq!(z_conj.im, -4.0);

        assert_relative_eq!(ComplexField::re(&z), 3.0);
        assert_relative_eq!(ComplexField::im(&z), 4.0);
    }

    #[test]
    fn test_f64_field() {
        let x: f64 = -3.0;
        assert_relative_eq!(x.norm_sqr(), 9.0);
        assert_relative_eq!(ComplexField::norm(&x), 3.0);
        assert_relative_eq!(ComplexField::conj(&x), -3.0);
        assert_relative_eq!(ComplexField::im(&x), 0.0);
        assert_relative_eq!(x.reciprocal_norm(), 1.0 / 3.0);
    }

    #[test]
    fn test_norm_does_not_overflow() {
        let big = 1e200_f64;
        assert_relative_eq!(ComplexField::norm(&big), 1e200);

        let z = Complex64::new(3e200, 4e200);
        assert_relative_eq!(ComplexField::norm(&z), 5e200, max_relative = 1e-12);
    }

    #[test]
    fn test_reciprocal_norm_of_zero_is_infinite() {
        assert_eq!(0.0_f64.reciprocal_norm(), f64::INFINITY);
        assert_eq!((-0.0_f32).reciprocal_norm(), f32::INFINITY);
        assert_eq!(Complex64::new(0.0, 0.0).reciprocal_norm(), f64::INFINITY);
        assert_relative_eq!((-4.0_f64).reciprocal_norm(), 0.25);
        assert_relative_eq!(Complex32::new(0.0, 2.0).reciprocal_norm(), 0.5);
    }

    #[test]
    fn test_is_finite() {
        assert!(1.0_f64.is_finite());
        assert!(!ComplexField::is_finite(&f64::NAN));
        assert!(!ComplexField::is_finite(&Complex64::new(1.0, f64::INFINITY)));
    }
}
