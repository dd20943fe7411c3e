//! Randomized invariants for the tridiagonal LU solver.
//!
//! Every case is drawn from a seeded generator so failures reproduce:
//!   - determinant agrees with an independent cofactor expansion, sign included
//!   - solutions satisfy A x = b up to a backward-error sized residual
//!   - diagonally dominant systems round-trip within a condition-scaled tolerance
//!   - transposed systems and complex systems obey the same laws

use approx::{assert_abs_diff_eq, assert_relative_eq};
use math_audio_tridiagonal::{
    ComplexField, TridiagonalLuFactorization, TridiagonalMatrix, max_norm, scaled_add,
};
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CASES: u64 = 200;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn random_matrix(rng: &mut StdRng, n: usize) -> TridiagonalMatrix<f64> {
    let diagonal: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let upper: Vec<f64> = (1..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let lower: Vec<f64> = (1..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    TridiagonalMatrix::from_vecs(diagonal, upper, lower).expect("valid bands")
}

fn dominant_matrix(rng: &mut StdRng, n: usize) -> TridiagonalMatrix<f64> {
    let upper: Vec<f64> = (1..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let lower: Vec<f64> = (1..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let diagonal: Vec<f64> = (0..n)
        .map(|_| {
            let magnitude = rng.random_range(2.5..4.0);
            if rng.random_bool(0.5) { magnitude } else { -magnitude }
        })
        .collect();
    TridiagonalMatrix::from_vecs(diagonal, upper, lower).expect("valid bands")
}

fn random_vector(rng: &mut StdRng, n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| rng.random_range(-1.0..1.0))
}

/// Laplace expansion along the first row
fn cofactor_determinant(m: &Array2<f64>) -> f64 {
    let n = m.nrows();
    match n {
        0 => 1.0,
        1 => m[[0, 0]],
        _ => (0..n)
            .filter(|&j| m[[0, j]] != 0.0)
            .map(|j| {
                let minor = Array2::from_shape_fn((n - 1, n - 1), |(r, c)| {
                    m[[r + 1, if c < j { c } else { c + 1 }]]
                });
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[[0, j]] * cofactor_determinant(&minor)
            })
            .sum(),
    }
}

/// Scale of the rounding error a backward stable solve may leave in A x - b
fn residual_scale(a: &TridiagonalMatrix<f64>, x: &Array1<f64>, b: &Array1<f64>) -> f64 {
    1e-10 * (max_norm(b) + 3.0 * a.max_abs_entry() * max_norm(x))
}

// ---------------------------------------------------------------------------
// 1. Determinant equals the cofactor expansion, sign included
// ---------------------------------------------------------------------------

#[test]
fn prop_determinant_matches_cofactor_expansion() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.random_range(1..=7);
        let a = random_matrix(&mut rng, n);
        let lu = TridiagonalLuFactorization::new(&a);

        let expected = cofactor_determinant(&a.to_dense());
        let scale: f64 = a
            .to_dense()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|v| v.abs()).sum::<f64>().max(1.0))
            .product();

        assert!(
            (lu.determinant() - expected).abs() <= 1e-12 * scale,
            "seed {seed}, n {n}: {} vs {expected}",
            lu.determinant()
        );
    }
}

// ---------------------------------------------------------------------------
// 2. General matrices: residual of a pivoted solve stays at rounding level
// ---------------------------------------------------------------------------

#[test]
fn prop_solution_satisfies_system() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let n = rng.random_range(1..=40);
        let a = random_matrix(&mut rng, n);
        let b = random_vector(&mut rng, n);

        let lu = TridiagonalLuFactorization::new(&a);
        if lu.is_singular() {
            continue;
        }
        let x = lu.solve(&b).expect("sizes match");
        if x.iter().any(|v| !v.is_finite()) {
            continue;
        }

        let residual = scaled_add(-1.0, &b, &a.multiply(&x).expect("sizes match"))
            .expect("sizes match");
        assert!(
            max_norm(&residual) <= residual_scale(&a, &x, &b),
            "seed {seed}, n {n}: residual {:e}",
            max_norm(&residual)
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Diagonally dominant matrices: basis round trip within cond * eps
// ---------------------------------------------------------------------------

#[test]
fn prop_dominant_round_trip_within_condition_tolerance() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(2_000 + seed);
        let n = rng.random_range(1..=30);
        let a = dominant_matrix(&mut rng, n);
        let lu = TridiagonalLuFactorization::new(&a);

        assert!(!lu.is_singular(), "seed {seed}");
        let tolerance = 64.0 * n as f64 * lu.approximate_condition_number() * f64::EPSILON;

        let identity = Array2::from_diag(&Array1::from_elem(n, 1.0));
        let inverse = lu.solve_columns(&identity).expect("sizes match");
        let product = a.to_dense().dot(&inverse);
        let error = (&product - &identity).iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(error <= tolerance, "seed {seed}: {error:e} > {tolerance:e}");
    }
}

// ---------------------------------------------------------------------------
// 4. det(A^T) == det(A), and A^T solves agree with dense arithmetic
// ---------------------------------------------------------------------------

#[test]
fn prop_transpose_laws() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(3_000 + seed);
        let n = rng.random_range(1..=12);
        let a = dominant_matrix(&mut rng, n);
        let at = a.transpose();

        let det = TridiagonalLuFactorization::new(&a).determinant();
        let det_t = TridiagonalLuFactorization::new(&at).determinant();
        assert_relative_eq!(det, det_t, epsilon = 1e-12, max_relative = 1e-12);

        let b = random_vector(&mut rng, n);
        let x = TridiagonalLuFactorization::new(&at).solve(&b).expect("sizes match");
        let back = a.to_dense().t().dot(&x);
        for i in 0..n {
            assert_abs_diff_eq!(back[i], b[i], epsilon = 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Complex matrices: pivoted solve and determinant via the continuant
// ---------------------------------------------------------------------------

#[test]
fn prop_complex_solve_and_continuant() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(4_000 + seed);
        let n = rng.random_range(1..=20);
        let mut c = || Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let diagonal: Vec<Complex64> = (0..n).map(|_| c()).collect();
        let upper: Vec<Complex64> = (1..n).map(|_| c()).collect();
        let lower: Vec<Complex64> = (1..n).map(|_| c()).collect();
        let expected: Array1<Complex64> = (0..n).map(|_| c()).collect();

        let a = TridiagonalMatrix::from_vecs(diagonal, upper, lower).expect("valid bands");
        let lu = TridiagonalLuFactorization::new(&a);
        if lu.is_singular() {
            continue;
        }

        // f_k = d_k f_{k-1} - l_{k-1} u_{k-1} f_{k-2}
        let (d, l, u) = (a.diagonal(), a.lower(), a.upper());
        let (mut f_prev, mut f) = (Complex64::new(1.0, 0.0), d[0]);
        for k in 1..n {
            (f_prev, f) = (f, d[k] * f - l[k - 1] * u[k - 1] * f_prev);
        }
        let scale = (0..n).fold(1.0_f64, |p, k| p * (ComplexField::norm(&d[k]) + 3.0));
        assert!(
            (lu.determinant() - f).norm() <= 1e-12 * scale,
            "seed {seed}, n {n}"
        );

        let b = a.multiply(&expected).expect("sizes match");
        let x = lu.solve(&b).expect("sizes match");
        let residual = &a.multiply(&x).expect("sizes match") - &b;
        let bound = 1e-10 * (max_norm(&b) + 3.0 * a.max_abs_entry() * max_norm(&x));
        assert!(max_norm(&residual) <= bound, "seed {seed}, n {n}");
    }
}
