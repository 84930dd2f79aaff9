//! Real-only sparse factorization backends.
//!
//! The rest of the crate talks to a factorization library only through
//! [`SparseBackend`]: factorize a CSC matrix, solve against dense buffers,
//! multiply, and release the factorization. [`BaselineBackend`] is the
//! bundled implementation.
//!
//! # Ownership
//!
//! A factorization handle belongs to whoever requested it until it is
//! passed back to [`SparseBackend::release`]. [`FactorGuard`] ties that
//! release to scope exit so it happens on every path, including early
//! returns through `?`.

use std::cell::Cell;

use nalgebra::{DMatrix, Dyn, LU, QR};
use nalgebra_sparse::CscMatrix;
use thiserror::Error;

use crate::dense::DenseMatrix;
use crate::math::Scalar;
use crate::sparse::CscExport;

/// Pivot magnitude below which a factorization is treated as singular.
const SINGULAR_PIVOT: Scalar = 1e-14;

/// Errors reported by a factorization backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// Matrix is singular or numerically singular.
    #[error("matrix is singular")]
    SingularMatrix,
    /// Matrix structure is unusable for the requested operation.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),
    /// Operand shapes do not agree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    /// Other backend-specific errors.
    #[error("{0}")]
    Other(String),
}

/// Factorization algorithms a backend may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorizationKind {
    /// Householder QR, suitable for general non-symmetric matrices.
    Qr,
    /// LU with partial pivoting.
    Lu,
}

/// Contract of a real-only sparse linear algebra library.
pub trait SparseBackend {
    /// Opaque factorization handle.
    type Factorization;

    /// Factorizes `matrix` (block size 1, general attributes).
    fn factorize(
        &self,
        kind: FactorizationKind,
        matrix: &CscExport,
    ) -> Result<Self::Factorization, BackendError>;

    /// Solves `A·X = rhs` for every column of `rhs`, writing `X` into `out`.
    fn solve(
        &self,
        factor: &Self::Factorization,
        rhs: &DenseMatrix,
        out: &mut DenseMatrix,
    ) -> Result<(), BackendError>;

    /// Computes `y = A·x`.
    fn multiply(&self, matrix: &CscExport, x: &DenseMatrix, y: &mut DenseMatrix) -> Result<(), BackendError>;

    /// Frees the resources behind a factorization handle.
    ///
    /// The handle must not be passed to [`SparseBackend::solve`] afterwards.
    fn release(&self, factor: &mut Self::Factorization);

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Scoped owner of a factorization handle.
///
/// The handle is returned to its backend when the guard drops.
pub struct FactorGuard<'a, B: SparseBackend> {
    backend: &'a B,
    factor: B::Factorization,
}

impl<'a, B: SparseBackend> FactorGuard<'a, B> {
    /// Factorizes `matrix` with `backend` and takes ownership of the handle.
    pub fn factorize(backend: &'a B, kind: FactorizationKind, matrix: &CscExport) -> Result<Self, BackendError> {
        let factor = backend.factorize(kind, matrix)?;
        Ok(Self { backend, factor })
    }

    /// Solves against the guarded factorization.
    pub fn solve(&self, rhs: &DenseMatrix, out: &mut DenseMatrix) -> Result<(), BackendError> {
        self.backend.solve(&self.factor, rhs, out)
    }
}

impl<B: SparseBackend> Drop for FactorGuard<'_, B> {
    fn drop(&mut self) {
        log::trace!("releasing {} factorization", self.backend.name());
        self.backend.release(&mut self.factor);
    }
}

/// Factorization produced by [`BaselineBackend`].
pub struct BaselineFactorization {
    dimension: usize,
    decomposition: Decomposition,
}

enum Decomposition {
    Qr(QR<Scalar, Dyn, Dyn>),
    Lu(LU<Scalar, Dyn, Dyn>),
}

impl BaselineFactorization {
    /// Order of the factorized matrix.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Algorithm used.
    #[must_use]
    pub fn kind(&self) -> FactorizationKind {
        match self.decomposition {
            Decomposition::Qr(_) => FactorizationKind::Qr,
            Decomposition::Lu(_) => FactorizationKind::Lu,
        }
    }
}

/// Reference backend using dense conversion and nalgebra QR/LU.
///
/// Not suitable for large systems: the matrix is densified before
/// factorization, costing O(n²) memory and O(n³) time.
#[derive(Debug, Default)]
pub struct BaselineBackend {
    live: Cell<usize>,
}

impl BaselineBackend {
    /// Creates a new baseline backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of factorizations handed out and not yet released.
    #[must_use]
    pub fn live_factorizations(&self) -> usize {
        self.live.get()
    }

    /// Converts CSC sparse matrix to dense for factorization.
    fn csc_to_dense(csc: &CscMatrix<Scalar>) -> DMatrix<Scalar> {
        let mut dense = DMatrix::zeros(csc.nrows(), csc.ncols());
        for (row, col, value) in csc.triplet_iter() {
            dense[(row, col)] = *value;
        }
        dense
    }

    /// Smallest pivot magnitude; a non-finite pivot counts as zero.
    fn min_abs_diagonal(m: &DMatrix<Scalar>) -> Scalar {
        (0..m.nrows().min(m.ncols()))
            .map(|i| m[(i, i)])
            .map(|d| if d.is_finite() { d.abs() } else { 0.0 })
            .fold(Scalar::INFINITY, Scalar::min)
    }
}

impl SparseBackend for BaselineBackend {
    type Factorization = BaselineFactorization;

    fn factorize(&self, kind: FactorizationKind, matrix: &CscExport) -> Result<Self::Factorization, BackendError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(BackendError::InvalidMatrix(format!(
                "matrix must be square: {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        let dimension = matrix.nrows();
        let csc = matrix
            .to_nalgebra()
            .map_err(|e| BackendError::InvalidMatrix(e.to_string()))?;
        let dense = Self::csc_to_dense(&csc);

        let decomposition = match kind {
            FactorizationKind::Qr => {
                let qr = dense.qr();
                if Self::min_abs_diagonal(&qr.r()) < SINGULAR_PIVOT {
                    return Err(BackendError::SingularMatrix);
                }
                Decomposition::Qr(qr)
            }
            FactorizationKind::Lu => {
                let lu = dense.lu();
                if Self::min_abs_diagonal(&lu.u()) < SINGULAR_PIVOT {
                    return Err(BackendError::SingularMatrix);
                }
                Decomposition::Lu(lu)
            }
        };

        self.live.set(self.live.get() + 1);
        log::debug!("{} {kind:?} factorization of order {dimension} ({} nnz)", self.name(), matrix.nnz());
        Ok(BaselineFactorization {
            dimension,
            decomposition,
        })
    }

    fn solve(
        &self,
        factor: &Self::Factorization,
        rhs: &DenseMatrix,
        out: &mut DenseMatrix,
    ) -> Result<(), BackendError> {
        if rhs.rows() != factor.dimension {
            return Err(BackendError::DimensionMismatch(format!(
                "rhs has {} rows, factorization has order {}",
                rhs.rows(),
                factor.dimension
            )));
        }
        if out.rows() != rhs.rows() || out.cols() != rhs.cols() {
            return Err(BackendError::DimensionMismatch(format!(
                "output is {}x{}, rhs is {}x{}",
                out.rows(),
                out.cols(),
                rhs.rows(),
                rhs.cols()
            )));
        }

        let b = rhs.to_nalgebra();
        let x = match &factor.decomposition {
            Decomposition::Qr(qr) => qr.solve(&b),
            Decomposition::Lu(lu) => lu.solve(&b),
        }
        .ok_or(BackendError::SingularMatrix)?;

        out.copy_from_nalgebra(&x)
            .map_err(|e| BackendError::DimensionMismatch(e.to_string()))
    }

    fn multiply(&self, matrix: &CscExport, x: &DenseMatrix, y: &mut DenseMatrix) -> Result<(), BackendError> {
        if x.rows() != matrix.ncols() || y.rows() != matrix.nrows() || y.cols() != x.cols() {
            return Err(BackendError::DimensionMismatch(format!(
                "cannot multiply {}x{} matrix by {}x{} into {}x{}",
                matrix.nrows(),
                matrix.ncols(),
                x.rows(),
                x.cols(),
                y.rows(),
                y.cols()
            )));
        }

        y.as_mut_slice().fill(0.0);
        for c in 0..x.cols() {
            let xc = x.column(c);
            let yc = y.column_mut(c);
            for (row, col, value) in matrix.triplet_iter() {
                yc[row] += value * xc[col];
            }
        }
        Ok(())
    }

    fn release(&self, factor: &mut Self::Factorization) {
        self.live.set(self.live.get().saturating_sub(1));
        log::trace!("{} released order {} factorization", self.name(), factor.dimension);
    }

    fn name(&self) -> &str {
        "baseline-dense"
    }
}
