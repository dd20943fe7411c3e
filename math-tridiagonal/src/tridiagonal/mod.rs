//! Tridiagonal matrix representation
//!
//! - [`TridiagonalMatrix`]: three-band storage with O(n) products

mod matrix;

pub use matrix::TridiagonalMatrix;
