//! Convenience re-exports for assembling and solving sparse systems.

pub use crate::backend::{BackendError, BaselineBackend, FactorGuard, FactorizationKind, SparseBackend};
pub use crate::config::{ExportValidation, MatrixConfig};
pub use crate::dense::{DenseError, DenseMatrix, LogicalVector};
pub use crate::errors::ComplexSparseError;
pub use crate::math::{
    complex_nan, is_complex_nan, CScalar, Scalar, COMPLEX_TOLERANCE, REAL_TOLERANCE, SPARSE_MATRIX_ERROR,
};
pub use crate::solve::{
    multiply, multiply_complex, multiply_complex_with, multiply_with, solve, solve_complex, solve_complex_with,
    solve_with, SolveError,
};
pub use crate::sparse::{CscExport, EntryKey, EntryStore, ExportError, MatrixError, MatrixMode, SparseMatrix};
