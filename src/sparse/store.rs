//! Dictionary-of-keys backing store holding physical real cells.

use std::collections::HashMap;

use crate::math::{is_near_zero, Scalar};

use super::key::EntryKey;
use super::MatrixError;

/// Map from physical cell to a non-zero real value.
///
/// The store never holds an explicit zero: `set` prunes anything below the
/// supplied tolerance and `get` reads absence as exactly `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    entries: HashMap<EntryKey, Scalar>,
    rows: usize,
    cols: usize,
}

impl EntryStore {
    /// Creates an empty store with physical dimensions `rows × cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            entries: HashMap::new(),
            rows,
            cols,
        }
    }

    /// Physical row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Physical column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn check_bounds(&self, key: EntryKey) -> Result<(), MatrixError> {
        if key.row >= self.rows || key.col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: key.row,
                col: key.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Returns the stored value at `key`, or `0.0` if nothing is stored.
    pub fn get(&self, key: EntryKey) -> Result<Scalar, MatrixError> {
        self.check_bounds(key)?;
        Ok(self.entries.get(&key).copied().unwrap_or(0.0))
    }

    /// Stores `value` at `key`, or removes the entry if `|value| < tolerance`.
    ///
    /// NaN and infinite values are rejected and leave the store untouched.
    pub fn set(&mut self, key: EntryKey, value: Scalar, tolerance: Scalar) -> Result<(), MatrixError> {
        self.check_bounds(key)?;
        if !value.is_finite() {
            return Err(MatrixError::NonFiniteValue {
                row: key.row,
                col: key.col,
            });
        }
        if is_near_zero(value, tolerance) {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    /// Number of stored (non-pruned) cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True if no cell is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a value is stored at `key`.
    #[must_use]
    pub fn contains(&self, key: EntryKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Iterates stored cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, Scalar)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }

    /// Returns all stored cells sorted by (column, row).
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(EntryKey, Scalar)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable_by_key(|&(key, _)| key);
        sorted
    }
}
