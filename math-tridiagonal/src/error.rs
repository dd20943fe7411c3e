//! Error types for tridiagonal matrix operations.
//!
//! Only shape problems are errors. A singular or ill-conditioned matrix is
//! reported through the factorization's diagnostics instead.

use thiserror::Error;

/// Errors that can occur when building or applying a tridiagonal matrix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TridiagonalError {
    /// Band lengths are inconsistent, or the diagonal is empty.
    #[error(
        "invalid tridiagonal dimensions: diagonal has {diagonal} elements, \
         upper has {upper}, lower has {lower} (expected n >= 1, n - 1, n - 1)"
    )]
    InvalidDimension {
        /// Length of the main diagonal
        diagonal: usize,
        /// Length of the superdiagonal
        upper: usize,
        /// Length of the subdiagonal
        lower: usize,
    },

    /// A vector does not match the matrix size.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Length actually supplied
        got: usize,
    },
}

/// A specialized `Result` type for tridiagonal operations.
pub type Result<T> = std::result::Result<T, TridiagonalError>;

impl TridiagonalError {
    /// Returns `true` if this error comes from matrix construction.
    pub fn is_invalid_dimension(&self) -> bool {
        matches!(self, TridiagonalError::InvalidDimension { .. })
    }

    /// Returns `true` if a vector of the wrong length was supplied.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, TridiagonalError::DimensionMismatch { .. })
    }
}

/// Fails with [`TridiagonalError::DimensionMismatch`] unless `got == expected`.
#[inline]
pub(crate) fn check_len(expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(TridiagonalError::DimensionMismatch { expected, got })
    }
}
