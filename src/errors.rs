//! Shared error types used across submodules.

use thiserror::Error;

use crate::backend::BackendError;
use crate::dense::DenseError;
use crate::solve::SolveError;
use crate::sparse::{ExportError, MatrixError};

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplexSparseError {
    /// Wraps accessor precondition violations.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// Wraps CSC structural violations.
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Wraps dense adapter usage errors.
    #[error(transparent)]
    Dense(#[from] DenseError),
    /// Wraps factorization backend failures.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Wraps solve/multiply facade errors.
    #[error(transparent)]
    Solve(#[from] SolveError),
}
