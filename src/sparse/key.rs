//! Physical (row, column) addresses into the entry store.

use std::cmp::Ordering;

/// Physical cell address, 0-based.
///
/// Ordering is column-major: keys compare by column first, then by row,
/// which is the order the CSC exporter emits them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    /// Physical row index.
    pub row: usize,
    /// Physical column index.
    pub col: usize,
}

impl EntryKey {
    /// Creates a key for physical cell `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.col.cmp(&other.col).then(self.row.cmp(&other.row))
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, usize)> for EntryKey {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
