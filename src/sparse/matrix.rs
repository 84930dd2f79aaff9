//! Logical sparse matrices in real or complex mode.

use std::fmt;

use crate::config::MatrixConfig;
use crate::math::{complex_nan, CScalar, Scalar, SPARSE_MATRIX_ERROR};

use super::codec::{decode_complex, encode_complex};
use super::export::{export, CscExport, ExportError};
use super::key::EntryKey;
use super::store::EntryStore;
use super::MatrixError;

/// Scalar field of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixMode {
    /// One physical cell per logical `f64` entry.
    Real,
    /// One 2×2 physical block per logical complex entry.
    Complex,
}

impl MatrixMode {
    /// Physical cells per logical row/column.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Real => 1,
            Self::Complex => 2,
        }
    }
}

/// Sparse matrix addressed by logical `(row, col)` and backed by real cells.
///
/// Accessors come in two flavours. The `try_*` methods return a
/// [`MatrixError`] on an out-of-range index, a mode mismatch or a
/// non-finite value. The plain methods log the violation and fall back to
/// a sentinel:
/// [`SPARSE_MATRIX_ERROR`] for real reads and [`complex_nan`] for complex
/// reads, while writes leave the matrix untouched.
///
/// ```
/// use complex_sparse::prelude::*;
///
/// let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 2);
/// a.set_complex(0, 1, CScalar::new(1.0, -2.0));
/// assert_eq!(a.get_complex(0, 1), CScalar::new(1.0, -2.0));
/// assert_eq!(a.nnz(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    mode: MatrixMode,
    rows: usize,
    cols: usize,
    store: EntryStore,
    config: MatrixConfig,
}

impl SparseMatrix {
    /// Creates an empty `rows × cols` matrix with default configuration.
    ///
    /// Dimensions are logical: a complex matrix allocates a `2·rows × 2·cols`
    /// physical store.
    ///
    /// # Panics
    ///
    /// Panics if the physical dimensions overflow `usize`. Use
    /// [`SparseMatrix::try_with_config`] to handle that case.
    #[must_use]
    pub fn new(mode: MatrixMode, rows: usize, cols: usize) -> Self {
        Self::with_config(mode, rows, cols, MatrixConfig::default())
    }

    /// Creates an empty matrix with explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the physical dimensions overflow `usize`.
    #[must_use]
    pub fn with_config(mode: MatrixMode, rows: usize, cols: usize, config: MatrixConfig) -> Self {
        Self::try_with_config(mode, rows, cols, config).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates an empty matrix, reporting physical dimensions that overflow
    /// `usize` as [`MatrixError::DimensionOverflow`].
    pub fn try_with_config(
        mode: MatrixMode,
        rows: usize,
        cols: usize,
        config: MatrixConfig,
    ) -> Result<Self, MatrixError> {
        let b = mode.block_size();
        let overflow = MatrixError::DimensionOverflow { rows, cols };
        let physical_rows = rows.checked_mul(b).ok_or(overflow)?;
        let physical_cols = cols.checked_mul(b).ok_or(overflow)?;
        Ok(Self {
            mode,
            rows,
            cols,
            store: EntryStore::new(physical_rows, physical_cols),
            config,
        })
    }

    /// Scalar mode.
    #[must_use]
    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    /// Logical row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Logical column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Physical row count of the backing store.
    #[must_use]
    pub fn physical_rows(&self) -> usize {
        self.store.rows()
    }

    /// Physical column count of the backing store.
    #[must_use]
    pub fn physical_cols(&self) -> usize {
        self.store.cols()
    }

    /// True if the logical matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of stored physical cells.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.store.count()
    }

    /// Read-only view of the backing store.
    #[must_use]
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    fn check(&self, accessor: MatrixMode, i: usize, j: usize) -> Result<(), MatrixError> {
        if accessor != self.mode {
            return Err(MatrixError::ModeMismatch {
                accessor,
                mode: self.mode,
            });
        }
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Reads real entry `(i, j)`; absent entries read as `0.0`.
    pub fn try_get_real(&self, i: usize, j: usize) -> Result<Scalar, MatrixError> {
        self.check(MatrixMode::Real, i, j)?;
        self.store.get(EntryKey::new(i, j))
    }

    /// Writes real entry `(i, j)`, pruning values below the real tolerance.
    pub fn try_set_real(&mut self, i: usize, j: usize, value: Scalar) -> Result<(), MatrixError> {
        self.check(MatrixMode::Real, i, j)?;
        self.store.set(EntryKey::new(i, j), value, self.config.real_tolerance)
    }

    /// Reads complex entry `(i, j)`; absent components read as `0.0`.
    pub fn try_get_complex(&self, i: usize, j: usize) -> Result<CScalar, MatrixError> {
        self.check(MatrixMode::Complex, i, j)?;
        decode_complex(&self.store, i, j)
    }

    /// Writes complex entry `(i, j)`, pruning each component independently.
    pub fn try_set_complex(&mut self, i: usize, j: usize, value: CScalar) -> Result<(), MatrixError> {
        self.check(MatrixMode::Complex, i, j)?;
        encode_complex(&mut self.store, i, j, value, self.config.complex_tolerance)
    }

    /// Reads real entry `(i, j)`, returning [`SPARSE_MATRIX_ERROR`] on a violation.
    #[must_use]
    pub fn get_real(&self, i: usize, j: usize) -> Scalar {
        self.try_get_real(i, j).unwrap_or_else(|err| {
            log::error!("get_real({i}, {j}): {err}");
            SPARSE_MATRIX_ERROR
        })
    }

    /// Writes real entry `(i, j)`; a violation is logged and nothing is written.
    pub fn set_real(&mut self, i: usize, j: usize, value: Scalar) {
        if let Err(err) = self.try_set_real(i, j, value) {
            log::error!("set_real({i}, {j}): {err}");
        }
    }

    /// Reads complex entry `(i, j)`, returning [`complex_nan`] on a violation.
    #[must_use]
    pub fn get_complex(&self, i: usize, j: usize) -> CScalar {
        self.try_get_complex(i, j).unwrap_or_else(|err| {
            log::error!("get_complex({i}, {j}): {err}");
            complex_nan()
        })
    }

    /// Writes complex entry `(i, j)`; a violation is logged and nothing is written.
    pub fn set_complex(&mut self, i: usize, j: usize, value: CScalar) {
        if let Err(err) = self.try_set_complex(i, j, value) {
            log::error!("set_complex({i}, {j}): {err}");
        }
    }

    /// Exports the physical store as a CSC triple.
    pub fn to_csc(&self) -> Result<CscExport, ExportError> {
        export(&self.store, self.config.validation)
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for j in 0..self.cols {
                match self.mode {
                    MatrixMode::Real => write!(f, " {}", self.get_real(i, j))?,
                    MatrixMode::Complex => write!(f, " {}", self.get_complex(i, j))?,
                }
                write!(f, "{}", if j + 1 == self.cols { " |" } else { "  " })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::is_complex_nan;
    use crate::sparse::codec::block_keys;

    #[test]
    fn complex_mode_doubles_physical_dimensions() {
        let a = SparseMatrix::new(MatrixMode::Complex, 3, 5);
        assert_eq!((a.physical_rows(), a.physical_cols()), (6, 10));
        let b = SparseMatrix::new(MatrixMode::Real, 3, 5);
        assert_eq!((b.physical_rows(), b.physical_cols()), (3, 5));
    }

    #[test]
    fn complex_round_trip() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 4, 4);
        let z = CScalar::new(4.0, 9.0);
        a.set_complex(2, 0, z);
        let back = a.get_complex(2, 0);
        assert_relative_eq!(back.re, z.re);
        assert_relative_eq!(back.im, z.im);
        assert_eq!(a.get_complex(0, 2), CScalar::new(0.0, 0.0));
    }

    #[test]
    fn tiny_components_decode_as_exact_zero() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 1, 1);
        a.set_complex(0, 0, CScalar::new(2.0, 1.0e-13));
        assert_eq!(a.get_complex(0, 0), CScalar::new(2.0, 0.0));
    }

    #[test]
    fn zero_clears_the_whole_block() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 2);
        a.set_complex(1, 1, CScalar::new(3.0, -1.0));
        assert_eq!(a.nnz(), 4);
        a.set_complex(1, 1, CScalar::new(0.0, 0.0));
        assert_eq!(a.nnz(), 0);
        for key in block_keys(1, 1).all() {
            assert!(!a.store().contains(key));
        }
    }

    #[test]
    fn pure_real_value_stores_only_diagonal_cells() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 2);
        a.set_complex(0, 1, CScalar::new(-7.5, 2.0));
        a.set_complex(0, 1, CScalar::new(-7.5, 0.0));

        let keys = block_keys(0, 1);
        assert_eq!(a.nnz(), 2);
        assert!(a.store().contains(keys.upper_left));
        assert!(a.store().contains(keys.lower_right));
        assert_eq!(a.get_complex(0, 1), CScalar::new(-7.5, 0.0));
    }

    #[test]
    fn real_zero_prunes() {
        let mut a = SparseMatrix::new(MatrixMode::Real, 2, 2);
        a.set_real(1, 0, 6.0);
        assert_eq!(a.get_real(1, 0), 6.0);
        a.set_real(1, 0, 0.0);
        assert_eq!(a.nnz(), 0);
        assert_eq!(a.get_real(1, 0), 0.0);
    }

    #[test]
    fn mode_mismatch_returns_sentinels_and_leaves_store_alone() {
        let mut real = SparseMatrix::new(MatrixMode::Real, 2, 2);
        real.set_complex(0, 0, CScalar::new(1.0, 1.0));
        assert_eq!(real.nnz(), 0);
        assert!(is_complex_nan(real.get_complex(0, 0)));
        assert_eq!(
            real.try_get_complex(0, 0).unwrap_err(),
            MatrixError::ModeMismatch { accessor: MatrixMode::Complex, mode: MatrixMode::Real }
        );

        let mut complex = SparseMatrix::new(MatrixMode::Complex, 2, 2);
        complex.set_real(0, 0, 1.0);
        assert_eq!(complex.nnz(), 0);
        assert_eq!(complex.get_real(0, 0), SPARSE_MATRIX_ERROR);
    }

    #[test]
    fn logical_bounds_are_checked_before_encoding() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 3);
        // (2, 0) would map to physical rows 4..6, outside the 4-row store
        a.set_complex(2, 0, CScalar::new(1.0, 0.0));
        assert_eq!(a.nnz(), 0);
        assert!(is_complex_nan(a.get_complex(0, 3)));
        assert_eq!(
            a.try_set_complex(0, 3, CScalar::new(1.0, 0.0)).unwrap_err(),
            MatrixError::IndexOutOfBounds { row: 0, col: 3, rows: 2, cols: 3 }
        );

        let real = SparseMatrix::new(MatrixMode::Real, 2, 2);
        assert_eq!(real.get_real(5, 0), SPARSE_MATRIX_ERROR);
    }

    #[test]
    fn custom_tolerance_is_honoured() {
        let config = MatrixConfig::default().with_real_tolerance(1.0e-3);
        let mut a = SparseMatrix::with_config(MatrixMode::Real, 1, 1, config);
        a.set_real(0, 0, 5.0e-4);
        assert_eq!(a.nnz(), 0);
        a.set_real(0, 0, 5.0e-3);
        assert_eq!(a.nnz(), 1);
    }

    #[test]
    fn physical_overflow_is_reported() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(
            SparseMatrix::try_with_config(MatrixMode::Complex, huge, 1, MatrixConfig::default()).unwrap_err(),
            MatrixError::DimensionOverflow { rows: huge, cols: 1 }
        );
        assert!(SparseMatrix::try_with_config(MatrixMode::Complex, 1, huge, MatrixConfig::default()).is_err());
        let real = SparseMatrix::try_with_config(MatrixMode::Real, huge, huge, MatrixConfig::default()).unwrap();
        assert_eq!(real.physical_rows(), huge);
    }

    #[test]
    #[should_panic(expected = "does not fit in physical storage")]
    fn new_panics_on_physical_overflow() {
        let _ = SparseMatrix::new(MatrixMode::Complex, usize::MAX, 1);
    }

    #[test]
    fn non_finite_writes_are_skipped() {
        let mut real = SparseMatrix::new(MatrixMode::Real, 2, 2);
        real.set_real(0, 0, Scalar::NAN);
        real.set_real(1, 1, 1.0);
        assert_eq!(real.nnz(), 1);
        assert_eq!(real.get_real(0, 0), 0.0);
        assert_eq!(
            real.try_set_real(1, 1, Scalar::NEG_INFINITY).unwrap_err(),
            MatrixError::NonFiniteValue { row: 1, col: 1 }
        );
        assert_eq!(real.get_real(1, 1), 1.0);

        let mut complex = SparseMatrix::new(MatrixMode::Complex, 1, 1);
        complex.set_complex(0, 0, CScalar::new(Scalar::INFINITY, 0.0));
        assert_eq!(complex.nnz(), 0);
        assert_eq!(
            complex.try_set_complex(0, 0, CScalar::new(Scalar::INFINITY, 0.0)).unwrap_err(),
            MatrixError::NonFiniteValue { row: 0, col: 0 }
        );
    }

    #[test]
    fn export_cardinality_matches_store() {
        let mut a = SparseMatrix::new(MatrixMode::Complex, 2, 2);
        a.set_complex(0, 0, CScalar::new(1.0, 2.0));
        a.set_complex(1, 1, CScalar::new(3.0, 0.0));
        a.set_complex(1, 0, CScalar::new(0.0, -1.0));
        let csc = a.to_csc().unwrap();
        assert_eq!(csc.nnz(), a.nnz());
        assert_eq!(csc.col_offsets().len(), a.physical_cols() + 1);
        assert_eq!(csc.col_offsets(), &[0, 3, 6, 7, 8]);
        assert_eq!(csc.row_indices(), &[0, 1, 3, 0, 1, 2, 2, 3]);
        assert_eq!(csc.values(), &[1.0, 2.0, -1.0, -2.0, 1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn display_renders_logical_entries() {
        let mut a = SparseMatrix::new(MatrixMode::Real, 2, 2);
        a.set_real(0, 0, 2.0);
        a.set_real(1, 1, 3.0);
        assert_eq!(a.to_string(), "| 2   0 |\n| 0   3 |");

        let mut c = SparseMatrix::new(MatrixMode::Complex, 1, 1);
        c.set_complex(0, 0, CScalar::new(1.0, -2.0));
        assert_eq!(c.to_string(), "| 1-2i |");
    }
}
