//! Tridiagonal matrix in three-band storage
//!
//! Only the three nonzero diagonals are stored:
//! - `diagonal`: the main diagonal, length n
//! - `upper`: the superdiagonal, `upper[i] = A[i][i+1]`, length n - 1
//! - `lower`: the subdiagonal, `lower[i] = A[i+1][i]`, length n - 1
//!
//! Matrix-vector products cost O(n) instead of O(n²).

use crate::error::{Result, TridiagonalError, check_len};
use crate::traits::{ComplexField, LinearOperator};
use ndarray::{Array1, Array2};
use num_traits::{Float, Zero};

/// Square tridiagonal matrix of size n >= 1
///
/// The bands are private and fixed at construction, so the shape invariant
/// `len(diagonal) == len(upper) + 1 == len(lower) + 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix<T: ComplexField> {
    lower: Array1<T>,
    diagonal: Array1<T>,
    upper: Array1<T>,
}

impl<T: ComplexField> TridiagonalMatrix<T> {
    /// Create a matrix from its three bands
    ///
    /// Fails with [`TridiagonalError::InvalidDimension`] if `diagonal` is empty
    /// or if `upper`/`lower` are not exactly one element shorter.
    pub fn new(diagonal: Array1<T>, upper: Array1<T>, lower: Array1<T>) -> Result<Self> {
        let n = diagonal.len();
        if n == 0 || upper.len() + 1 != n || lower.len() + 1 != n {
            return Err(TridiagonalError::InvalidDimension {
                diagonal: n,
                upper: upper.len(),
                lower: lower.len(),
            });
        }

        Ok(Self {
            lower,
            diagonal,
            upper,
        })
    }

    /// Create a matrix from plain vectors
    pub fn from_vecs(diagonal: Vec<T>, upper: Vec<T>, lower: Vec<T>) -> Result<Self> {
        Self::new(
            Array1::from_vec(diagonal),
            Array1::from_vec(upper),
            Array1::from_vec(lower),
        )
    }

    /// Create a Toeplitz tridiagonal matrix with constant bands
    ///
    /// `from_constant(n, -1.0, 2.0, -1.0)` is the 1-D finite-difference Laplacian.
    pub fn from_constant(n: usize, lower: T, diagonal: T, upper: T) -> Result<Self> {
        let off = n.saturating_sub(1);
        Self::new(
            Array1::from_elem(n, diagonal),
            Array1::from_elem(off, upper),
            Array1::from_elem(off, lower),
        )
    }

    /// Matrix dimension n
    #[inline]
    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    /// Main diagonal (length n)
    #[inline]
    pub fn diagonal(&self) -> &Array1<T> {
        &self.diagonal
    }

    /// Superdiagonal (length n - 1)
    #[inline]
    pub fn upper(&self) -> &Array1<T> {
        &self.upper
    }

    /// Subdiagonal (length n - 1)
    #[inline]
    pub fn lower(&self) -> &Array1<T> {
        &self.lower
    }

    /// Matrix-vector product A * x
    pub fn multiply(&self, x: &Array1<T>) -> Result<Array1<T>> {
        check_len(self.size(), x.len())?;
        let mut b = Array1::zeros(self.size());
        self.accumulate_product(x, &mut b);
        Ok(b)
    }

    /// Affine combine A * x + y
    pub fn affine_apply(&self, x: &Array1<T>, y: &Array1<T>) -> Result<Array1<T>> {
        check_len(self.size(), x.len())?;
        check_len(self.size(), y.len())?;
        let mut b = y.clone();
        self.accumulate_product(x, &mut b);
        Ok(b)
    }

    /// Transposed matrix (upper and lower bands exchanged)
    pub fn transpose(&self) -> Self {
        Self {
            lower: self.upper.clone(),
            diagonal: self.diagonal.clone(),
            upper: self.lower.clone(),
        }
    }

    /// Expand to a dense n x n matrix
    pub fn to_dense(&self) -> Array2<T> {
        let n = self.size();
        let mut dense = Array2::zeros((n, n));
        for i in 0..n {
            dense[[i, i]] = self.diagonal[i];
        }
        for i in 0..n - 1 {
            dense[[i, i + 1]] = self.upper[i];
            dense[[i + 1, i]] = self.lower[i];
        }
        dense
    }

    /// Largest entry magnitude over the three bands
    pub fn max_abs_entry(&self) -> T::Real {
        self.diagonal
            .iter()
            .chain(self.upper.iter())
            .chain(self.lower.iter())
            .map(|v| v.norm())
            .fold(T::Real::zero(), Float::max)
    }

    /// acc += A * x, lengths already checked
    fn accumulate_product(&self, x: &Array1<T>, acc: &mut Array1<T>) {
        let n = self.size();
        acc[0] += self.diagonal[0] * x[0];
        if n == 1 {
            return;
        }
        acc[0] += self.upper[0] * x[1];
        acc[n - 1] += self.lower[n - 2] * x[n - 2] + self.diagonal[n - 1] * x[n - 1];
        for i in 1..n - 1 {
            acc[i] += self.lower[i - 1] * x[i - 1]
                + self.diagonal[i] * x[i]
                + self.upper[i] * x[i + 1];
        }
    }
}

impl<T: ComplexField> LinearOperator<T> for TridiagonalMatrix<T> {
    fn num_rows(&self) -> usize {
        self.size()
    }

    fn num_cols(&self) -> usize {
        self.size()
    }

    fn apply(&self, x: &Array1<T>) -> Array1<T> {
        assert_eq!(x.len(), self.size(), "Input vector has wrong length");
        let mut y = Array1::zeros(self.size());
        self.accumulate_product(x, &mut y);
        y
    }

    fn apply_transpose(&self, x: &Array1<T>) -> Array1<T> {
        assert_eq!(x.len(), self.size(), "Input vector has wrong length");
        let mut y = Array1::zeros(self.size());
        self.transpose().accumulate_product(x, &mut y);
        y
    }
}
