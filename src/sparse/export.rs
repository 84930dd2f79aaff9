//! Compressed sparse column export of the entry store.
//!
//! The exported triple is what a real-only sparse factorization consumes:
//! column offsets of length `ncols + 1`, and row indices with values sorted
//! by row inside each column. Columns must not be empty; an empty column is
//! a structural error reported by [`ExportError::EmptyColumn`] rather than
//! silently handed to the solver.

use nalgebra_sparse::CscMatrix;
use thiserror::Error;

use crate::config::ExportValidation;
use crate::math::Scalar;

use super::store::EntryStore;

/// Structural invariant violations detected while exporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// A physical column holds no entries.
    #[error("column {column} is empty ({empty_columns} empty column(s) in total)")]
    EmptyColumn {
        /// First empty column.
        column: usize,
        /// Number of empty columns found.
        empty_columns: usize,
    },
    /// A row index falls outside `[0, nrows)`.
    #[error("row index {row} at position {position} is outside 0..{nrows}")]
    RowIndexOutOfBounds {
        /// Offending row index.
        row: usize,
        /// Position within `row_indices`.
        position: usize,
        /// Physical row count.
        nrows: usize,
    },
    /// Row indices within a column are not strictly increasing.
    #[error("row indices in column {column} are not strictly increasing")]
    UnsortedColumn {
        /// Offending column.
        column: usize,
    },
    /// Column offsets are malformed (wrong length, non-zero start, or decreasing).
    #[error("column offsets are not monotonic at column {column}")]
    NonMonotonicOffsets {
        /// Column whose offset range is inverted.
        column: usize,
    },
    /// Offsets, row indices and values disagree on the entry count.
    #[error("cardinality mismatch: offsets end at {offsets_end}, {row_indices} row indices, {values} values")]
    CardinalityMismatch {
        /// Final column offset.
        offsets_end: usize,
        /// Length of `row_indices`.
        row_indices: usize,
        /// Length of `values`.
        values: usize,
    },
    /// `nalgebra_sparse` refused the triple.
    #[error("invalid CSC data: {0}")]
    Format(String),
}

/// Owned CSC triple with its physical dimensions.
///
/// Block size is 1 and the matrix carries no symmetry or triangular
/// attributes: it is a general matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CscExport {
    nrows: usize,
    ncols: usize,
    col_offsets: Vec<usize>,
    row_indices: Vec<usize>,
    values: Vec<Scalar>,
}

/// Exports `store` as a CSC triple over its physical dimensions.
///
/// Sorts the stored cells by (column, row) and accumulates per-column counts
/// into a prefix sum.
pub fn export(store: &EntryStore, validation: ExportValidation) -> Result<CscExport, ExportError> {
    let (nrows, ncols) = (store.rows(), store.cols());
    let sorted = store.sorted_entries();
    let nnz = sorted.len();

    let mut row_indices = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    let mut per_column = vec![0usize; ncols];

    for (key, value) in sorted {
        row_indices.push(key.row);
        values.push(value);
        per_column[key.col] += 1;
    }

    let mut empty = per_column.iter().enumerate().filter(|&(_, &n)| n == 0).map(|(c, _)| c);
    if let Some(column) = empty.next() {
        let empty_columns = 1 + empty.count();
        log::warn!("refusing CSC export: column {column} is empty ({empty_columns} empty)");
        return Err(ExportError::EmptyColumn { column, empty_columns });
    }

    let mut col_offsets = Vec::with_capacity(ncols + 1);
    col_offsets.push(0);
    let mut running = 0;
    for count in per_column {
        running += count;
        col_offsets.push(running);
    }

    let csc = CscExport {
        nrows,
        ncols,
        col_offsets,
        row_indices,
        values,
    };

    if validation == ExportValidation::Full {
        csc.validate()?;
    }

    log::debug!("exported {nrows}x{ncols} CSC with {nnz} entries");
    Ok(csc)
}

impl CscExport {
    /// Builds an export from raw arrays after checking every structural invariant.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        col_offsets: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<Scalar>,
    ) -> Result<Self, ExportError> {
        let csc = Self {
            nrows,
            ncols,
            col_offsets,
            row_indices,
            values,
        };
        csc.validate()?;
        if let Some(column) = (0..ncols).find(|&c| csc.col_offsets[c] == csc.col_offsets[c + 1]) {
            let empty_columns = (0..ncols)
                .filter(|&c| csc.col_offsets[c] == csc.col_offsets[c + 1])
                .count();
            return Err(ExportError::EmptyColumn { column, empty_columns });
        }
        Ok(csc)
    }

    /// Checks offsets, row bounds, per-column ordering and cardinalities.
    pub fn validate(&self) -> Result<(), ExportError> {
        let nnz = self.row_indices.len();
        if self.col_offsets.len() != self.ncols + 1 || self.col_offsets[0] != 0 {
            return Err(ExportError::NonMonotonicOffsets { column: 0 });
        }

        let offsets_end = self.col_offsets[self.ncols];
        if offsets_end != nnz || self.values.len() != nnz {
            return Err(ExportError::CardinalityMismatch {
                offsets_end,
                row_indices: nnz,
                values: self.values.len(),
            });
        }

        for column in 0..self.ncols {
            let (start, end) = (self.col_offsets[column], self.col_offsets[column + 1]);
            if start > end || end > nnz {
                return Err(ExportError::NonMonotonicOffsets { column });
            }
            let rows = &self.row_indices[start..end];
            if let Some(offset) = rows.iter().position(|&r| r >= self.nrows) {
                return Err(ExportError::RowIndexOutOfBounds {
                    row: rows[offset],
                    position: start + offset,
                    nrows: self.nrows,
                });
            }
            if rows.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ExportError::UnsortedColumn { column });
            }
        }
        Ok(())
    }

    /// Physical row count.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Physical column count.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column offsets, length `ncols + 1`.
    #[must_use]
    pub fn col_offsets(&self) -> &[usize] {
        &self.col_offsets
    }

    /// Row index of each entry.
    #[must_use]
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Value of each entry, parallel to `row_indices`.
    #[must_use]
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// Row indices and values of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= ncols`.
    #[must_use]
    pub fn column(&self, j: usize) -> (&[usize], &[Scalar]) {
        let range = self.col_offsets[j]..self.col_offsets[j + 1];
        (&self.row_indices[range.clone()], &self.values[range])
    }

    /// Iterates `(row, col, value)` in column-major order.
    pub fn triplet_iter(&self) -> impl Iterator<Item = (usize, usize, Scalar)> + '_ {
        (0..self.ncols).flat_map(move |col| {
            let (rows, vals) = self.column(col);
            rows.iter().zip(vals).map(move |(&row, &v)| (row, col, v))
        })
    }

    /// Copies the triple into an `nalgebra_sparse` matrix.
    pub fn to_nalgebra(&self) -> Result<CscMatrix<Scalar>, ExportError> {
        CscMatrix::try_from_csc_data(
            self.nrows,
            self.ncols,
            self.col_offsets.clone(),
            self.row_indices.clone(),
            self.values.clone(),
        )
        .map_err(|e| ExportError::Format(e.to_string()))
    }

    /// Splits the export into `(col_offsets, row_indices, values)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<Scalar>) {
        (self.col_offsets, self.row_indices, self.values)
    }
}
