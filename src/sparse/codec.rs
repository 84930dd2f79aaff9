//! 2×2 real block encoding of complex entries.
//!
//! A logical entry `z = a + bi` at `(i, j)` occupies the physical block at
//! base `(2i, 2j)`:
//!
//! ```text
//! | a  -b |
//! | b   a |
//! ```
//!
//! This is the ring embedding of ℂ into 2×2 real matrices, so complex
//! sums and products map onto real matrix sums and products and a real-only
//! solver applied to the physical matrix solves the complex system.

use nalgebra::Matrix2;

use crate::math::{CScalar, Scalar};

use super::key::EntryKey;
use super::store::EntryStore;
use super::MatrixError;

/// The four physical keys of one logical complex entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockKeys {
    /// `(2i, 2j)`, holds the real part.
    pub upper_left: EntryKey,
    /// `(2i, 2j+1)`, holds the negated imaginary part.
    pub upper_right: EntryKey,
    /// `(2i+1, 2j)`, holds the imaginary part.
    pub lower_left: EntryKey,
    /// `(2i+1, 2j+1)`, holds the real part.
    pub lower_right: EntryKey,
}

impl BlockKeys {
    /// All four keys, row-major.
    #[must_use]
    pub fn all(&self) -> [EntryKey; 4] {
        [self.upper_left, self.upper_right, self.lower_left, self.lower_right]
    }
}

/// Physical keys of the block for logical entry `(i, j)`.
#[must_use]
pub fn block_keys(i: usize, j: usize) -> BlockKeys {
    let (r, c) = (2 * i, 2 * j);
    BlockKeys {
        upper_left: EntryKey::new(r, c),
        upper_right: EntryKey::new(r, c + 1),
        lower_left: EntryKey::new(r + 1, c),
        lower_right: EntryKey::new(r + 1, c + 1),
    }
}

/// The real 2×2 matrix representing `z`.
#[must_use]
pub fn embed(z: CScalar) -> Matrix2<Scalar> {
    Matrix2::new(z.re, -z.im, z.im, z.re)
}

/// Writes `z` into the block at logical `(i, j)`.
///
/// Components are pruned independently: a real part below `tolerance`
/// clears the diagonal cells and an imaginary part below `tolerance` clears
/// the off-diagonal cells. Nothing is written unless the whole block is in
/// bounds and both components are finite.
pub fn encode_complex(
    store: &mut EntryStore,
    i: usize,
    j: usize,
    z: CScalar,
    tolerance: Scalar,
) -> Result<(), MatrixError> {
    let keys = block_keys(i, j);
    // lower_right is the largest row and column of the block
    store.get(keys.lower_right)?;
    if !z.re.is_finite() || !z.im.is_finite() {
        let key = if z.re.is_finite() { keys.lower_left } else { keys.upper_left };
        return Err(MatrixError::NonFiniteValue {
            row: key.row,
            col: key.col,
        });
    }

    store.set(keys.upper_left, z.re, tolerance)?;
    store.set(keys.lower_right, z.re, tolerance)?;
    store.set(keys.upper_right, -z.im, tolerance)?;
    store.set(keys.lower_left, z.im, tolerance)?;
    Ok(())
}

/// Reads the logical entry at `(i, j)` back out of the store.
///
/// The real part comes from `(2i, 2j)` and the imaginary part from
/// `(2i+1, 2j)`; either may be absent independently.
pub fn decode_complex(store: &EntryStore, i: usize, j: usize) -> Result<CScalar, MatrixError> {
    let keys = block_keys(i, j);
    store.get(keys.lower_right)?;

    let re = store.get(keys.upper_left)?;
    let im = store.get(keys.lower_left)?;
    Ok(CScalar::new(re, im))
}
