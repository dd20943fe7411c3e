//! O(n) direct solver for tridiagonal linear systems
//!
//! Tridiagonal systems come out of 1-D finite-difference stencils, cubic
//! spline fits and implicit time stepping. A banded LU factorization solves
//! them in O(n), where a dense LU would cost O(n³).
//!
//! # Features
//!
//! - **Matrix**: [`TridiagonalMatrix`] in three-band storage with O(n) products
//! - **Direct solver**: [`TridiagonalLuFactorization`], LU with adjacent-row
//!   partial pivoting, reusable across right-hand sides
//! - **Diagnostics**: determinant, singular flag, smallest pivot and a cheap
//!   condition estimate
//! - **Generic Scalar Types**: Works with Complex64, Complex32, f64, f32
//! - **Parallel multi-RHS**: `solve_columns` uses rayon with the `rayon` feature
//!
//! # Example
//!
//! ```
//! use math_audio_tridiagonal::{TridiagonalLuFactorization, TridiagonalMatrix};
//! use ndarray::array;
//!
//! // 1-D Laplacian
//! let a = TridiagonalMatrix::from_constant(5, -1.0_f64, 2.0, -1.0)?;
//! let lu = TridiagonalLuFactorization::new(&a);
//! assert!(!lu.is_singular());
//!
//! let x = lu.solve(&array![1.0, 0.0, 0.0, 0.0, 1.0])?;
//! let b = a.multiply(&x)?;
//! assert!((b[0] - 1.0).abs() < 1e-12);
//! assert!((lu.determinant() - 6.0).abs() < 1e-12);
//! # Ok::<(), math_audio_tridiagonal::TridiagonalError>(())
//! ```

pub mod direct;
pub mod error;
pub mod parallel;
pub mod traits;
pub mod tridiagonal;
pub mod vector_ops;

// Re-export main types
pub use error::{Result, TridiagonalError};
pub use traits::{ComplexField, LinearOperator, Preconditioner};
pub use tridiagonal::TridiagonalMatrix;

// Re-export direct solver
pub use direct::{TridiagonalLuConfig, TridiagonalLuFactorization, tridiagonal_solve};

// Re-export vector helpers
pub use vector_ops::{max_norm, scaled_add, vector_norm};
