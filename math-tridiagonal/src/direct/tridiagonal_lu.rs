//! Tridiagonal LU decomposition solver
//!
//! Gaussian elimination with partial pivoting, specialised to three bands.
//! Only rows k and k + 1 hold a nonzero in column k, so the pivot search
//! never looks further than the next row. A row interchange can pull an
//! entry two columns right of the diagonal into row k, which is why U keeps
//! a second superdiagonal.
//!
//! Factorization and each solve are O(n).

use crate::error::{Result, check_len};
use crate::parallel::{is_parallel_available, parallel_map_indexed};
use crate::traits::{ComplexField, Preconditioner};
use crate::tridiagonal::TridiagonalMatrix;
use ndarray::{Array1, Array2, ArrayViewMut1};
use num_traits::{Float, ToPrimitive, Zero};

/// Number of right-hand sides before `solve_columns` goes parallel
const PARALLEL_COLUMN_THRESHOLD: usize = 8;

/// Tridiagonal LU configuration
#[derive(Debug, Clone)]
pub struct TridiagonalLuConfig<R> {
    /// Pivots with magnitude at or below this value mark the matrix singular
    pub singularity_threshold: R,
    /// Log a summary of the factorization (size, pivots, condition estimate)
    pub log_diagnostics: bool,
}

impl<R: Float> Default for TridiagonalLuConfig<R> {
    fn default() -> Self {
        Self {
            singularity_threshold: R::zero(),
            log_diagnostics: false,
        }
    }
}

/// Pivoted LU factorization of a tridiagonal matrix
///
/// Stores U in three bands (`au0` diagonal, `au1` and `au2` the first and
/// second superdiagonals), the elimination multipliers and the sequence of
/// row interchanges. Immutable once built; solves only touch the caller's
/// vector, so one factorization can serve many threads.
///
/// A singular matrix is not an error: [`is_singular`](Self::is_singular) is
/// set and solves return infinite or NaN entries.
#[derive(Debug, Clone)]
pub struct TridiagonalLuFactorization<T: ComplexField> {
    au0: Vec<T>,
    au1: Vec<T>,
    au2: Vec<T>,
    /// Multipliers of the elimination, replayed during forward substitution
    al: Vec<T>,
    /// Row swapped into position k at step k (applied in order, not a permutation)
    indx: Vec<usize>,
    /// Odd number of row interchanges
    sign_flips: bool,
    singular: bool,
    smallest_pivot_magnitude: T::Real,
    approximate_condition_number: T::Real,
}

impl<T: ComplexField> TridiagonalLuFactorization<T> {
    /// Factorize `matrix` with the default configuration
    pub fn new(matrix: &TridiagonalMatrix<T>) -> Self {
        Self::with_config(matrix, &TridiagonalLuConfig::default())
    }

    /// Factorize `matrix`
    ///
    /// Always completes; singularity is recorded, not raised.
    pub fn with_config(
        matrix: &TridiagonalMatrix<T>,
        config: &TridiagonalLuConfig<T::Real>,
    ) -> Self {
        let n = matrix.size();
        let zero = T::zero();

        // Row k >= 1 starts one column to the left: (A[k][k-1], A[k][k], A[k][k+1]).
        // Eliminating column k shifts row k + 1 back into place.
        let mut au0: Vec<T> = std::iter::once(matrix.diagonal()[0])
            .chain(matrix.lower().iter().copied())
            .collect();
        let mut au1: Vec<T> = matrix.diagonal().to_vec();
        let mut au2: Vec<T> = matrix
            .upper()
            .iter()
            .copied()
            .chain(std::iter::once(zero))
            .collect();
        au1[0] = au2[0];
        au2[0] = zero;

        let max_entry = au0
            .iter()
            .chain(au1.iter())
            .chain(au2.iter())
            .map(|v| v.norm())
            .fold(T::Real::zero(), Float::max);

        let mut al = vec![zero; n];
        let mut indx: Vec<usize> = (0..n).collect();
        let mut sign_flips = false;
        let mut singular = false;
        let mut smallest_pivot = au0[0].norm();
        let mut largest_inverse_pivot = au0[0].reciprocal_norm();

        for k in 0..n {
            let mut pivot_row = k;
            if k + 1 < n && au0[k + 1].norm() > au0[k].norm() {
                pivot_row = k + 1;
            }

            let pivot_norm = au0[pivot_row].norm();
            smallest_pivot = smallest_pivot.min(pivot_norm);
            largest_inverse_pivot = largest_inverse_pivot.max(au0[pivot_row].reciprocal_norm());

            indx[k] = pivot_row;
            if pivot_row != k {
                au0.swap(k, pivot_row);
                au1.swap(k, pivot_row);
                au2.swap(k, pivot_row);
                sign_flips = !sign_flips;
            }

            if pivot_norm <= config.singularity_threshold {
                singular = true;
            }

            if k + 1 < n {
                // A zero pivot gives an infinite or NaN multiplier; it is kept as is.
                let multiplier = au0[k + 1] / au0[k];
                al[k] = multiplier;
                au0[k + 1] = au1[k + 1] - multiplier * au1[k];
                au1[k + 1] = au2[k + 1] - multiplier * au2[k];
                au2[k + 1] = zero;
            }
        }

        let approximate_condition_number = if largest_inverse_pivot.is_infinite() {
            T::Real::infinity()
        } else {
            largest_inverse_pivot * max_entry
        };

        if config.log_diagnostics {
            log::debug!(
                "Tridiagonal LU: n = {}, max entry = {:.6e}, smallest pivot = {:.6e}, condition estimate = {:.6e}",
                n,
                max_entry.to_f64().unwrap_or(f64::NAN),
                smallest_pivot.to_f64().unwrap_or(f64::NAN),
                approximate_condition_number.to_f64().unwrap_or(f64::NAN)
            );
            if singular {
                log::warn!(
                    "Tridiagonal LU: singular pivot (|pivot| = {:.3e}), solutions will not be finite",
                    smallest_pivot.to_f64().unwrap_or(f64::NAN)
                );
            }
        }

        Self {
            au0,
            au1,
            au2,
            al,
            indx,
            sign_flips,
            singular,
            smallest_pivot_magnitude: smallest_pivot,
            approximate_condition_number,
        }
    }

    /// Matrix dimension n
    #[inline]
    pub fn size(&self) -> usize {
        self.au0.len()
    }

    /// True when a pivot was (numerically) zero
    ///
    /// Check this before trusting a solution.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Smallest pivot magnitude met during elimination
    #[inline]
    pub fn smallest_pivot_magnitude(&self) -> T::Real {
        self.smallest_pivot_magnitude
    }

    /// Cheap conditioning estimate: largest band entry over smallest pivot
    ///
    /// Advisory only, not a norm-based bound. Infinite for a zero pivot.
    #[inline]
    pub fn approximate_condition_number(&self) -> T::Real {
        self.approximate_condition_number
    }

    /// Determinant of the factorized matrix
    ///
    /// Product of the pivots, negated for an odd number of row interchanges.
    /// Exactly zero as soon as one pivot is zero, even if later pivots were
    /// poisoned by the resulting NaN multiplier.
    pub fn determinant(&self) -> T {
        if self.au0.iter().any(|pivot| pivot.is_zero()) {
            return T::zero();
        }
        let det = self.au0.iter().fold(T::one(), |acc, &pivot| acc * pivot);
        if self.sign_flips { -det } else { det }
    }

    /// Solve Ax = b, overwriting `x` (holding b) with the solution
    pub fn solve_in_place(&self, x: &mut Array1<T>) -> Result<()> {
        check_len(self.size(), x.len())?;
        self.substitute(x.view_mut());
        Ok(())
    }

    /// Slice flavour of [`solve_in_place`](Self::solve_in_place)
    pub fn solve_slice_in_place(&self, x: &mut [T]) -> Result<()> {
        check_len(self.size(), x.len())?;
        self.substitute(ArrayViewMut1::from(x));
        Ok(())
    }

    /// Solve Ax = b, returning x
    pub fn solve(&self, b: &Array1<T>) -> Result<Array1<T>> {
        let mut x = b.clone();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Solve AX = B for every column of `rhs`
    ///
    /// Columns are independent; with the `rayon` feature they are solved in
    /// parallel once there are enough of them.
    pub fn solve_columns(&self, rhs: &Array2<T>) -> Result<Array2<T>> {
        check_len(self.size(), rhs.nrows())?;
        let ncols = rhs.ncols();

        let solve_column = |j: usize| {
            let mut x = rhs.column(j).to_owned();
            self.substitute(x.view_mut());
            x
        };

        let columns: Vec<Array1<T>> =
            if ncols >= PARALLEL_COLUMN_THRESHOLD && is_parallel_available() {
                parallel_map_indexed(ncols, solve_column)
            } else {
                (0..ncols).map(solve_column).collect()
            };

        let mut solution = Array2::zeros((self.size(), ncols));
        for (j, column) in columns.iter().enumerate() {
            solution.column_mut(j).assign(column);
        }
        Ok(solution)
    }

    /// Forward elimination replay followed by back substitution, length checked
    fn substitute(&self, mut x: ArrayViewMut1<'_, T>) {
        let n = self.size();

        for k in 0..n {
            x.swap(k, self.indx[k]);
            if k + 1 < n {
                let xk = x[k];
                x[k + 1] -= self.al[k] * xk;
            }
        }

        x[n - 1] = x[n - 1] / self.au0[n - 1];
        if n == 1 {
            return;
        }
        x[n - 2] = (x[n - 2] - self.au1[n - 2] * x[n - 1]) / self.au0[n - 2];
        for i in (0..n.saturating_sub(2)).rev() {
            x[i] = (x[i] - self.au1[i] * x[i + 1] - self.au2[i] * x[i + 2]) / self.au0[i];
        }
    }
}

impl<T: ComplexField> Preconditioner<T> for TridiagonalLuFactorization<T> {
    fn apply(&self, r: &Array1<T>) -> Array1<T> {
        assert_eq!(r.len(), self.size(), "Residual vector has wrong length");
        let mut z = r.clone();
        self.substitute(z.view_mut());
        z
    }
}

/// Solve Ax = b for a tridiagonal A
///
/// Convenience wrapper that factorizes and solves once. Check the returned
/// values for non-finite entries if A may be singular, or keep the
/// factorization around with [`TridiagonalLuFactorization::new`].
pub fn tridiagonal_solve<T: ComplexField>(
    matrix: &TridiagonalMatrix<T>,
    b: &Array1<T>,
) -> Result<Array1<T>> {
    TridiagonalLuFactorization::new(matrix).solve(b)
}
