//! Dense right-hand-side and solution buffers in the solver's column-major layout.
//!
//! A real vector of length `n` is an `n × 1` buffer. A complex vector of
//! length `n` is a `2n × 2` buffer with column stride `2n`: element `i`
//! occupies rows `2i` and `2i+1` and holds the 2×2 embedding of the value,
//!
//! ```text
//! column 0: [.., re_i, im_i, ..]
//! column 1: [.., -im_i, re_i, ..]
//! ```
//!
//! so the product of a block-encoded sparse matrix with this buffer is the
//! buffer of the complex product.

use nalgebra::DMatrix;
use thiserror::Error;

use crate::math::{CScalar, Scalar};
use crate::sparse::MatrixMode;

/// Usage errors raised by the dense adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenseError {
    /// Zero-length input or zero-sized allocation request.
    #[error("dense buffers require at least one element")]
    EmptyInput,
    /// Buffer shape does not match the requested decoding.
    #[error("expected a {expected_cols}-column buffer, found {rows}x{cols}")]
    LayoutMismatch {
        /// Column count the decoder requires.
        expected_cols: usize,
        /// Actual row count.
        rows: usize,
        /// Actual column count.
        cols: usize,
    },
}

/// A logical vector of real or complex scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalVector {
    /// Real entries.
    Real(Vec<Scalar>),
    /// Complex entries.
    Complex(Vec<CScalar>),
}

impl LogicalVector {
    /// Number of logical elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(v) => v.len(),
            Self::Complex(v) => v.len(),
        }
    }

    /// True if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar mode of the elements.
    #[must_use]
    pub fn mode(&self) -> MatrixMode {
        match self {
            Self::Real(_) => MatrixMode::Real,
            Self::Complex(_) => MatrixMode::Complex,
        }
    }
}

/// Owned column-major dense buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    column_stride: usize,
    data: Vec<Scalar>,
}

impl DenseMatrix {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            column_stride: rows,
            data: vec![0.0; rows * cols],
        }
    }

    /// Encodes a real vector as an `n × 1` buffer.
    pub fn encode_real(values: &[Scalar]) -> Result<Self, DenseError> {
        if values.is_empty() {
            return Err(DenseError::EmptyInput);
        }
        Ok(Self {
            rows: values.len(),
            cols: 1,
            column_stride: values.len(),
            data: values.to_vec(),
        })
    }

    /// Zeroed `count × 1` buffer for receiving a real result.
    pub fn empty_real(count: usize) -> Result<Self, DenseError> {
        if count == 0 {
            return Err(DenseError::EmptyInput);
        }
        Ok(Self::zeros(count, 1))
    }

    /// Encodes a complex vector as a `2n × 2` block buffer.
    pub fn encode_complex(values: &[CScalar]) -> Result<Self, DenseError> {
        let mut dense = Self::empty_complex(values.len())?;
        let stride = dense.column_stride;
        for (i, z) in values.iter().enumerate() {
            let r = 2 * i;
            dense.data[r] = z.re;
            dense.data[r + 1] = z.im;
            dense.data[stride + r] = -z.im;
            dense.data[stride + r + 1] = z.re;
        }
        Ok(dense)
    }

    /// Zeroed `2·count × 2` buffer for receiving a complex result.
    pub fn empty_complex(count: usize) -> Result<Self, DenseError> {
        if count == 0 {
            return Err(DenseError::EmptyInput);
        }
        Ok(Self::zeros(2 * count, 2))
    }

    /// Encodes either kind of logical vector.
    pub fn encode(values: &LogicalVector) -> Result<Self, DenseError> {
        match values {
            LogicalVector::Real(v) => Self::encode_real(v),
            LogicalVector::Complex(v) => Self::encode_complex(v),
        }
    }

    /// Zeroed buffer sized for `count` elements of `mode`.
    pub fn empty(mode: MatrixMode, count: usize) -> Result<Self, DenseError> {
        match mode {
            MatrixMode::Real => Self::empty_real(count),
            MatrixMode::Complex => Self::empty_complex(count),
        }
    }

    /// Reads a single-column buffer back as a real vector.
    pub fn decode_real(&self) -> Result<Vec<Scalar>, DenseError> {
        if self.cols != 1 {
            return Err(self.layout_mismatch(1));
        }
        Ok(self.column(0).to_vec())
    }

    /// Reads a `2n × 2` block buffer back as a complex vector.
    ///
    /// Only column 0 is consulted: `re_i` at row `2i`, `im_i` at row `2i+1`.
    pub fn decode_complex(&self) -> Result<Vec<CScalar>, DenseError> {
        if self.cols != 2 || self.rows % 2 != 0 {
            return Err(self.layout_mismatch(2));
        }
        Ok(self
            .column(0)
            .chunks_exact(2)
            .map(|pair| CScalar::new(pair[0], pair[1]))
            .collect())
    }

    /// Decodes according to `mode`.
    pub fn decode(&self, mode: MatrixMode) -> Result<LogicalVector, DenseError> {
        match mode {
            MatrixMode::Real => self.decode_real().map(LogicalVector::Real),
            MatrixMode::Complex => self.decode_complex().map(LogicalVector::Complex),
        }
    }

    fn layout_mismatch(&self, expected_cols: usize) -> DenseError {
        DenseError::LayoutMismatch {
            expected_cols,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance in elements between the starts of consecutive columns.
    #[must_use]
    pub fn column_stride(&self) -> usize {
        self.column_stride
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Scalar {
        assert!(row < self.rows && col < self.cols, "dense index out of range");
        self.data[col * self.column_stride + row]
    }

    /// Column `j` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    #[must_use]
    pub fn column(&self, j: usize) -> &[Scalar] {
        assert!(j < self.cols, "dense column out of range");
        let start = j * self.column_stride;
        &self.data[start..start + self.rows]
    }

    /// Column `j` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    pub fn column_mut(&mut self, j: usize) -> &mut [Scalar] {
        assert!(j < self.cols, "dense column out of range");
        let start = j * self.column_stride;
        &mut self.data[start..start + self.rows]
    }

    /// The raw column-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    /// The raw column-major storage, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    /// Copies into an `nalgebra` matrix.
    #[must_use]
    pub fn to_nalgebra(&self) -> DMatrix<Scalar> {
        DMatrix::from_fn(self.rows, self.cols, |r, c| self.get(r, c))
    }

    /// Overwrites this buffer with `source`, which must have the same shape.
    pub fn copy_from_nalgebra(&mut self, source: &DMatrix<Scalar>) -> Result<(), DenseError> {
        if source.nrows() != self.rows || source.ncols() != self.cols {
            return Err(DenseError::LayoutMismatch {
                expected_cols: self.cols,
                rows: source.nrows(),
                cols: source.ncols(),
            });
        }
        for c in 0..self.cols {
            for (dst, src) in self.column_mut(c).iter_mut().zip(source.column(c).iter()) {
                *dst = *src;
            }
        }
        Ok(())
    }
}
