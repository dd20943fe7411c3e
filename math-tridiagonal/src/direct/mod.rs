//! Direct solvers for tridiagonal systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`TridiagonalLuFactorization`]: banded LU with adjacent-row partial pivoting
//! - [`tridiagonal_solve`]: one-shot factorize and solve

mod tridiagonal_lu;

pub use tridiagonal_lu::{TridiagonalLuConfig, TridiagonalLuFactorization, tridiagonal_solve};
