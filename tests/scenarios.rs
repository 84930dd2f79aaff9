use approx::assert_relative_eq;
use complex_sparse::prelude::*;
use complex_sparse::sparse::block_keys;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Diagonally dominant complex matrix with a sprinkling of off-diagonal entries.
fn random_complex_matrix(n: usize, seed: u64) -> SparseMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut a = SparseMatrix::new(MatrixMode::Complex, n, n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                let re = rng.gen_range(n as f64..2.0 * n as f64);
                let im = if rng.gen_bool(0.3) { rng.gen_range(-1.0..1.0) } else { 0.0 };
                a.set_complex(i, j, CScalar::new(re, im));
            } else if rng.gen_bool(0.2) {
                a.set_complex(i, j, CScalar::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)));
            }
        }
    }
    a
}

#[test]
fn real_diagonal_scenario() {
    let mut a = SparseMatrix::new(MatrixMode::Real, 2, 2);
    a.set_real(0, 0, 2.0);
    a.set_real(1, 1, 3.0);

    let x = solve(&a, &[4.0, 9.0]).unwrap();
    assert_relative_eq!(x[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(x[1], 3.0, epsilon = 1e-9);
}

#[test]
fn complex_identity_scenario() {
    let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 2);
    a.set_complex(0, 0, CScalar::new(1.0, 0.0));
    a.set_complex(1, 1, CScalar::new(1.0, 0.0));
    a.set_complex(0, 1, CScalar::new(0.0, 0.0));
    a.set_complex(1, 0, CScalar::new(0.0, 0.0));

    let b = [CScalar::new(2.0, 3.0), CScalar::new(-1.0, 4.0)];
    let x = solve_complex(&a, &b).unwrap();
    for (got, want) in x.iter().zip(&b) {
        assert_relative_eq!(got.re, want.re, epsilon = 1e-9);
        assert_relative_eq!(got.im, want.im, epsilon = 1e-9);
    }
}

#[test]
fn reset_to_zero_scenario() {
    let mut a = SparseMatrix::new(MatrixMode::Complex, 3, 3);
    a.set_complex(1, 2, CScalar::new(5.0, -2.0));
    assert_eq!(a.nnz(), 4);

    a.set_complex(1, 2, CScalar::new(0.0, 0.0));
    assert_eq!(a.nnz(), 0);
    for key in block_keys(1, 2).all() {
        assert!(!a.store().contains(key));
    }
}

#[test]
fn original_four_by_four_multiply_then_solve() {
    let mut a = SparseMatrix::new(MatrixMode::Complex, 4, 4);
    a.set_complex(0, 0, CScalar::new(5.0, 2.0));
    a.set_complex(2, 0, CScalar::new(4.0, 9.0));
    a.set_complex(3, 0, CScalar::new(3.2, 1.0));
    a.set_complex(0, 1, CScalar::new(3.0, 1.0));
    a.set_complex(1, 1, CScalar::new(-2.0, -2.0));
    a.set_complex(2, 1, CScalar::new(9.0, -4.5));
    a.set_complex(0, 2, CScalar::new(2.0, -3.0));
    a.set_complex(1, 2, CScalar::new(1.0, 1.5));
    a.set_complex(3, 2, CScalar::new(2.3, 0.0));
    a.set_complex(2, 3, CScalar::new(6.0, 2.3));

    let csc = a.to_csc().unwrap();
    assert_eq!(csc.col_offsets().len(), 9);
    assert_eq!(csc.nnz(), a.nnz());

    let x = [
        CScalar::new(2.5, 3.5),
        CScalar::new(1.6, -2.0),
        CScalar::new(1.0, 4.2),
        CScalar::new(0.0, -6.3),
    ];
    let y = multiply_complex(&a, &x).unwrap();
    assert_relative_eq!(y[3].re, (CScalar::new(3.2, 1.0) * x[0] + CScalar::new(2.3, 0.0) * x[2]).re, epsilon = 1e-12);

    let back = solve_complex(&a, &y).unwrap();
    for (got, want) in back.iter().zip(&x) {
        assert_relative_eq!(got.re, want.re, epsilon = 1e-9);
        assert_relative_eq!(got.im, want.im, epsilon = 1e-9);
    }
}

#[test]
fn random_matrices_export_valid_csc() {
    for seed in 0..8 {
        let a = random_complex_matrix(12, seed);
        let csc = a.to_csc().unwrap();

        let offsets = csc.col_offsets();
        assert_eq!(offsets.len(), a.physical_cols() + 1);
        assert_eq!(offsets[0], 0);
        assert_eq!(*offsets.last().unwrap(), a.nnz());
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        for j in 0..csc.ncols() {
            let (rows, _) = csc.column(j);
            assert!(rows.windows(2).all(|w| w[0] < w[1]));
            assert!(rows.iter().all(|&r| r < a.physical_rows()));
        }
        assert!(csc.validate().is_ok());
    }
}

#[test]
fn random_complex_round_trip_through_solver() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for seed in 0..4 {
        let a = random_complex_matrix(8, seed);
        let x: Vec<CScalar> = (0..8)
            .map(|_| CScalar::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)))
            .collect();

        let b = multiply_complex(&a, &x).unwrap();
        let back = solve_complex(&a, &b).unwrap();
        for (got, want) in back.iter().zip(&x) {
            assert!((got - want).norm() < 1e-9, "seed {seed}: {got} != {want}");
        }
    }
}

#[test]
fn random_entries_round_trip_through_codec() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut a = SparseMatrix::new(MatrixMode::Complex, 5, 5);
    for _ in 0..100 {
        let (i, j) = (rng.gen_range(0..5), rng.gen_range(0..5));
        let z = CScalar::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        a.set_complex(i, j, z);
        assert_eq!(a.get_complex(i, j), z);
    }
}
