//! Per-matrix configuration: pruning tolerances and export validation.

use crate::math::{Scalar, COMPLEX_TOLERANCE, REAL_TOLERANCE};

/// How much structural checking the CSC exporter performs.
///
/// The empty-column check is part of the export contract and runs under
/// every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportValidation {
    /// Empty-column check plus a full structural pass over the exported arrays.
    #[default]
    Full,
    /// Only the empty-column check.
    EmptyColumnsOnly,
}

/// Settings shared by a matrix and everything exported from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixConfig {
    /// Pruning threshold for real-mode entries.
    pub real_tolerance: Scalar,
    /// Pruning threshold applied to each component of a complex entry.
    pub complex_tolerance: Scalar,
    /// Structural checking performed by the exporter.
    pub validation: ExportValidation,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            real_tolerance: REAL_TOLERANCE,
            complex_tolerance: COMPLEX_TOLERANCE,
            validation: ExportValidation::Full,
        }
    }
}

impl MatrixConfig {
    /// Overrides the real-mode pruning threshold.
    #[must_use]
    pub fn with_real_tolerance(mut self, tolerance: Scalar) -> Self {
        self.real_tolerance = tolerance;
        self
    }

    /// Overrides the complex-mode pruning threshold.
    #[must_use]
    pub fn with_complex_tolerance(mut self, tolerance: Scalar) -> Self {
        self.complex_tolerance = tolerance;
        self
    }

    /// Selects the export validation level.
    #[must_use]
    pub fn with_validation(mut self, validation: ExportValidation) -> Self {
        self.validation = validation;
        self
    }
}
