//! Sparse complex/real matrices stored as real cells for real-only solvers.

use thiserror::Error;

/// Physical cell addresses.
pub mod key;
/// Dictionary-of-keys store of physical cells.
pub mod store;
/// 2×2 block encoding of complex entries.
pub mod codec;
/// Logical matrices with real or complex accessors.
pub mod matrix;
/// Compressed sparse column export.
pub mod export;

pub use codec::{block_keys, decode_complex, embed, encode_complex, BlockKeys};
pub use export::{CscExport, ExportError};
pub use key::EntryKey;
pub use matrix::{MatrixMode, SparseMatrix};
pub use store::EntryStore;

/// Precondition violations raised by matrix accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Index outside the matrix dimensions.
    #[error("index ({row}, {col}) is outside a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Row count of the addressed matrix.
        rows: usize,
        /// Column count of the addressed matrix.
        cols: usize,
    },
    /// Accessor does not match the matrix mode.
    #[error("{accessor:?} accessor used on a {mode:?} matrix")]
    ModeMismatch {
        /// Mode the accessor requires.
        accessor: MatrixMode,
        /// Mode of the matrix.
        mode: MatrixMode,
    },
    /// Value is NaN or infinite.
    #[error("non-finite value at ({row}, {col})")]
    NonFiniteValue {
        /// Physical row of the rejected cell.
        row: usize,
        /// Physical column of the rejected cell.
        col: usize,
    },
    /// Physical dimensions `2·rows` or `2·cols` do not fit in `usize`.
    #[error("a {rows}x{cols} matrix does not fit in physical storage")]
    DimensionOverflow {
        /// Requested logical rows.
        rows: usize,
        /// Requested logical columns.
        cols: usize,
    },
}
