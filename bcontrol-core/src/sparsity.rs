use sprs::{CsMat, TriMat};

use crate::{EvalError, IndexStyle};

/// A single structural position in a sparse matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entry {
    pub row: usize,
    pub col: usize,
}

/// The fixed set of `(row, col)` positions that may be nonzero in a sparse
/// derivative matrix.
///
/// A pattern is returned by a structure query and then handed back with every
/// values query, so the position of each value is always defined by the
/// pattern it was computed against. Indices are zero-based; use
/// [`SparsityPattern::to_index_arrays`] to produce one-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsityPattern {
    nrows: usize,
    ncols: usize,
    entries: Vec<Entry>,
}

impl SparsityPattern {
    /// Creates an empty pattern for an `nrows × ncols` matrix with room for
    /// `capacity` entries.
    #[must_use]
    pub fn with_capacity(nrows: usize, ncols: usize, capacity: usize) -> Self {
        Self {
            nrows,
            ncols,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a structural entry.
    pub fn push(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.nrows, "row {row} out of range");
        debug_assert!(col < self.ncols, "col {col} out of range");
        self.entries.push(Entry { row, col });
    }

    /// Returns the number of structural entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the pattern has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the matrix shape as `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Returns the entries in pattern order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterates over the entries in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = Entry> + '_ {
        self.entries.iter().copied()
    }

    /// Returns true if every entry lies inside the matrix shape.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.in_range().count() == self.entries.len()
    }

    fn in_range(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries
            .iter()
            .filter(|e| e.row < self.nrows && e.col < self.ncols)
    }

    /// Returns true if no entry lies above the diagonal.
    #[must_use]
    pub fn is_lower_triangular(&self) -> bool {
        self.entries.iter().all(|e| e.col <= e.row)
    }

    /// Returns true if every entry lies on the diagonal.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.entries.iter().all(|e| e.col == e.row)
    }

    /// Returns true if some in-range position appears more than once.
    ///
    /// Compressing the triplets sums repeated positions, so the compressed
    /// matrix has fewer nonzeros than the pattern exactly when there are
    /// duplicates.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        let mut tri = TriMat::new((self.nrows, self.ncols));
        for e in self.in_range() {
            tri.add_triplet(e.row, e.col, 1.0_f64);
        }
        let csr: CsMat<f64> = tri.to_csr();
        csr.nnz() != tri.nnz()
    }

    /// Returns row and column index arrays under the given convention.
    #[must_use]
    pub fn to_index_arrays(&self, style: IndexStyle) -> (Vec<usize>, Vec<usize>) {
        let base = style.base();
        self.entries
            .iter()
            .map(|e| (e.row + base, e.col + base))
            .unzip()
    }

    /// Assembles pattern values into a compressed sparse row matrix.
    ///
    /// Repeated positions are summed.
    ///
    /// # Panics
    ///
    /// Panics if an entry lies outside the matrix shape; see
    /// [`SparsityPattern::in_bounds`].
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::PatternMismatch`] if `values` does not have one
    /// entry per structural position.
    pub fn assemble(&self, values: &[f64]) -> Result<CsMat<f64>, EvalError> {
        if values.len() != self.entries.len() {
            return Err(EvalError::PatternMismatch {
                expected: self.entries.len(),
                actual: values.len(),
            });
        }

        let mut tri = TriMat::with_capacity((self.nrows, self.ncols), self.entries.len());
        for (e, &v) in self.entries.iter().zip(values) {
            tri.add_triplet(e.row, e.col, v);
        }
        Ok(tri.to_csr())
    }
}
