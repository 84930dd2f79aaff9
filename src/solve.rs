//! One-shot `A·x = b` solves and `y = A·x` products on logical matrices.
//!
//! Each call exports the matrix, encodes the vector, runs the backend and
//! decodes the result. Every intermediate buffer is an owned value and the
//! factorization sits in a [`FactorGuard`], so all of them are released on
//! every exit path. Usage errors are detected before any work is done.

use thiserror::Error;

use crate::backend::{BackendError, BaselineBackend, FactorGuard, FactorizationKind, SparseBackend};
use crate::dense::{DenseError, DenseMatrix};
use crate::math::{CScalar, Scalar};
use crate::sparse::{ExportError, MatrixMode, SparseMatrix};

/// Errors returned by the solve and multiply helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Matrix mode does not match the vector type.
    #[error("expected a {expected:?} matrix, found {found:?}")]
    ModeMismatch {
        /// Mode required by the operation.
        expected: MatrixMode,
        /// Mode of the supplied matrix.
        found: MatrixMode,
    },
    /// Solving requires a square matrix.
    #[error("matrix must be square, found {rows}x{cols}")]
    NotSquare {
        /// Logical rows.
        rows: usize,
        /// Logical columns.
        cols: usize,
    },
    /// Vector length does not match the matrix.
    #[error("vector of length {len} does not match a matrix dimension of {expected}")]
    DimensionMismatch {
        /// Length required by the matrix.
        expected: usize,
        /// Supplied vector length.
        len: usize,
    },
    /// Matrix failed CSC export.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Vector could not be encoded or decoded.
    #[error(transparent)]
    Dense(#[from] DenseError),
    /// Backend factorization, solve or multiply failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Checks mode, shape and vector length before anything is allocated.
fn check_operands(a: &SparseMatrix, mode: MatrixMode, len: usize, square: bool) -> Result<(), SolveError> {
    let err = if a.mode() != mode {
        SolveError::ModeMismatch {
            expected: mode,
            found: a.mode(),
        }
    } else if len == 0 {
        SolveError::Dense(DenseError::EmptyInput)
    } else if square && !a.is_square() {
        SolveError::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        }
    } else if len != a.cols() {
        SolveError::DimensionMismatch {
            expected: a.cols(),
            len,
        }
    } else {
        return Ok(());
    };
    log::error!("{err}");
    Err(err)
}

fn factor_and_solve<B: SparseBackend>(
    backend: &B,
    a: &SparseMatrix,
    rhs: &DenseMatrix,
) -> Result<DenseMatrix, SolveError> {
    let csc = a.to_csc()?;
    let mut out = DenseMatrix::empty(a.mode(), a.rows())?;
    let factor = FactorGuard::factorize(backend, FactorizationKind::Qr, &csc)?;
    factor.solve(rhs, &mut out)?;
    Ok(out)
}

fn apply<B: SparseBackend>(backend: &B, a: &SparseMatrix, x: &DenseMatrix) -> Result<DenseMatrix, SolveError> {
    let csc = a.to_csc()?;
    let mut y = DenseMatrix::empty(a.mode(), a.rows())?;
    backend.multiply(&csc, x, &mut y)?;
    Ok(y)
}

fn run<T>(op: &str, backend: &str, f: impl FnOnce() -> Result<T, SolveError>) -> Result<T, SolveError> {
    f().map_err(|err| {
        log::warn!("{op} via {backend} failed: {err}");
        err
    })
}

/// Solves the real system `A·x = b` with the baseline backend.
///
/// ```
/// use complex_sparse::prelude::*;
///
/// let mut a = SparseMatrix::new(MatrixMode::Real, 2, 2);
/// a.set_real(0, 0, 2.0);
/// a.set_real(1, 1, 3.0);
/// let x = solve(&a, &[4.0, 9.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12 && (x[1] - 3.0).abs() < 1e-12);
/// ```
pub fn solve(a: &SparseMatrix, b: &[Scalar]) -> Result<Vec<Scalar>, SolveError> {
    solve_with(&BaselineBackend::new(), a, b)
}

/// Solves the real system `A·x = b` with `backend` using QR factorization.
pub fn solve_with<B: SparseBackend>(backend: &B, a: &SparseMatrix, b: &[Scalar]) -> Result<Vec<Scalar>, SolveError> {
    check_operands(a, MatrixMode::Real, b.len(), true)?;
    run("solve", backend.name(), || {
        let rhs = DenseMatrix::encode_real(b)?;
        let x = factor_and_solve(backend, a, &rhs)?;
        Ok(x.decode_real()?)
    })
}

/// Solves the complex system `A·x = b` with the baseline backend.
pub fn solve_complex(a: &SparseMatrix, b: &[CScalar]) -> Result<Vec<CScalar>, SolveError> {
    solve_complex_with(&BaselineBackend::new(), a, b)
}

/// Solves the complex system `A·x = b` with `backend`.
///
/// The right-hand side is passed in the two-column block layout, so the
/// real solver returns the block layout of the complex solution.
pub fn solve_complex_with<B: SparseBackend>(
    backend: &B,
    a: &SparseMatrix,
    b: &[CScalar],
) -> Result<Vec<CScalar>, SolveError> {
    check_operands(a, MatrixMode::Complex, b.len(), true)?;
    run("solve_complex", backend.name(), || {
        let rhs = DenseMatrix::encode_complex(b)?;
        let x = factor_and_solve(backend, a, &rhs)?;
        Ok(x.decode_complex()?)
    })
}

/// Computes `y = A·x` for a real matrix with the baseline backend.
pub fn multiply(a: &SparseMatrix, x: &[Scalar]) -> Result<Vec<Scalar>, SolveError> {
    multiply_with(&BaselineBackend::new(), a, x)
}

/// Computes `y = A·x` for a real matrix with `backend`.
pub fn multiply_with<B: SparseBackend>(backend: &B, a: &SparseMatrix, x: &[Scalar]) -> Result<Vec<Scalar>, SolveError> {
    check_operands(a, MatrixMode::Real, x.len(), false)?;
    run("multiply", backend.name(), || {
        let xd = DenseMatrix::encode_real(x)?;
        Ok(apply(backend, a, &xd)?.decode_real()?)
    })
}

/// Computes `y = A·x` for a complex matrix with the baseline backend.
pub fn multiply_complex(a: &SparseMatrix, x: &[CScalar]) -> Result<Vec<CScalar>, SolveError> {
    multiply_complex_with(&BaselineBackend::new(), a, x)
}

/// Computes `y = A·x` for a complex matrix with `backend`.
pub fn multiply_complex_with<B: SparseBackend>(
    backend: &B,
    a: &SparseMatrix,
    x: &[CScalar],
) -> Result<Vec<CScalar>, SolveError> {
    check_operands(a, MatrixMode::Complex, x.len(), false)?;
    run("multiply_complex", backend.name(), || {
        let xd = DenseMatrix::encode_complex(x)?;
        Ok(apply(backend, a, &xd)?.decode_complex()?)
    })
}
