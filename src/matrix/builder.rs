//! Incremental row-by-row construction of the prolongation matrix
//!
//! Prolongation rows are produced out of row order: the direct pass commits
//! coarse and directly-interpolated rows, later indirect passes fill the
//! remaining ones. The builder therefore keeps per-row entry lists and a
//! committed flag per row, and compresses everything into CSR at the end.
//!
//! Committed rows are read back during indirect interpolation (a node's row
//! is composed from its neighbors' already-committed rows), so `row()` access
//! must be cheap.

use super::SparseMatrixCSR;

/// Builder for an N × C prolongation matrix with out-of-order row commits
pub struct ProlongationBuilder {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Vec<(usize, f64)>>,
    committed: Vec<bool>,
    n_committed: usize,
}

impl ProlongationBuilder {
    /// Create a builder for a matrix with `n_rows` fine rows and `n_cols`
    /// coarse columns
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: vec![Vec::new(); n_rows],
            committed: vec![false; n_rows],
            n_committed: 0,
        }
    }

    /// Number of rows already committed
    pub fn n_committed(&self) -> usize {
        self.n_committed
    }

    /// Number of fine rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of coarse columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Whether row i has been committed
    pub fn is_committed(&self, i: usize) -> bool {
        self.committed[i]
    }

    /// The entries of row i as (coarse column, weight) pairs
    ///
    /// Empty for rows not yet committed and for committed empty rows.
    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// Commit row i with the given (coarse column, weight) entries
    ///
    /// # Panics
    ///
    /// Panics if the row was already committed or an entry's column index is
    /// out of bounds. Rows are single-assignment.
    pub fn commit_row(&mut self, i: usize, entries: Vec<(usize, f64)>) {
        assert!(i < self.n_rows, "Row index out of bounds");
        assert!(!self.committed[i], "Row {} committed twice", i);
        for &(col, _) in &entries {
            assert!(col < self.n_cols, "Column index {} out of bounds (n_cols = {})", col, self.n_cols);
        }

        self.rows[i] = entries;
        self.committed[i] = true;
        self.n_committed += 1;
    }

    /// Commit row i as the identity mapping onto a single coarse column
    pub fn commit_identity_row(&mut self, i: usize, coarse_col: usize) {
        self.commit_row(i, vec![(coarse_col, 1.0)]);
    }

    /// Commit row i with no entries (isolated nodes are not interpolated)
    pub fn commit_empty_row(&mut self, i: usize) {
        self.commit_row(i, Vec::new());
    }

    /// Compress the committed rows into a CSR matrix
    ///
    /// Uncommitted rows become empty rows; entries within a row are sorted by
    /// column index. The count / prefix-sum / fill structure mirrors ordinary
    /// CSR assembly.
    pub fn finalize(mut self) -> SparseMatrixCSR<f64> {
        for row in &mut self.rows {
            row.sort_unstable_by_key(|&(col, _)| col);
        }

        // Row pointers via prefix sum over per-row entry counts
        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut running_sum = 0;
        row_ptr.push(0);
        for row in &self.rows {
            running_sum += row.len();
            row_ptr.push(running_sum);
        }

        let mut col_idx = Vec::with_capacity(running_sum);
        let mut values = Vec::with_capacity(running_sum);
        for row in &self.rows {
            for &(col, val) in row {
                col_idx.push(col);
                values.push(val);
            }
        }

        SparseMatrixCSR::new(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}
