//! Columns excluded from keyboard traversal

use std::collections::BTreeSet;

/// Set of column indices that traversal steps over
///
/// The set may change at runtime. It must never cover every column of the
/// grid it is used with: column traversal would not terminate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    columns: BTreeSet<usize>,
}

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column; returns false if it was already skipped
    pub fn insert(&mut self, col: usize) -> bool {
        self.columns.insert(col)
    }

    /// Remove a column; returns false if it was not skipped
    pub fn remove(&mut self, col: usize) -> bool {
        self.columns.remove(&col)
    }

    pub fn contains(&self, col: usize) -> bool {
        self.columns.contains(&col)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    /// Whether no column of a `column_count` wide grid is left to visit
    pub fn covers_all(&self, column_count: usize) -> bool {
        (0..column_count).all(|col| self.contains(col))
    }

    /// First column not skipped, if any
    pub fn first_unskipped(&self, column_count: usize) -> Option<usize> {
        (0..column_count).find(|col| !self.contains(*col))
    }
}

impl FromIterator<usize> for SkipSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for SkipSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.columns.extend(iter);
    }
}
