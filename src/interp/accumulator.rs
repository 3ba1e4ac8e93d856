//! Dense scratch accumulator for composing interpolation weights
//!
//! Indirect interpolation sums, per coarse column, the products of a node's
//! connection values with its neighbors' interpolation weights. A dense
//! array indexed by coarse column gives O(1) lookup per contribution, and a
//! list of touched columns makes the reset O(touched) instead of O(C), so
//! one accumulator can be reused across all nodes of a pass.

/// Accumulates (coarse column, weight) contributions for a single row
pub struct CoarseAccumulator {
    /// The dense accumulation array, indexed by coarse column
    values: Vec<f64>,

    /// Flags to track which coarse columns have been touched
    occupied: Vec<bool>,

    /// The touched coarse columns, in first-touch order
    cols: Vec<usize>,
}

impl CoarseAccumulator {
    /// Create an accumulator with capacity for `n_coarse` columns
    pub fn new(n_coarse: usize) -> Self {
        Self {
            values: vec![0.0; n_coarse],
            occupied: vec![false; n_coarse],
            cols: Vec::new(),
        }
    }

    /// Add a contribution for the given coarse column
    pub fn accumulate(&mut self, col: usize, val: f64) {
        if !self.occupied[col] {
            self.occupied[col] = true;
            self.cols.push(col);
            self.values[col] = val;
        } else {
            self.values[col] += val;
        }
    }

    /// Whether no column has been touched since the last drain
    ///
    /// A touched column counts even if its contributions cancelled to zero;
    /// cancellation is a numeric degeneracy, not an empty set.
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    /// Extract the touched entries sorted by column and reset for the next
    /// row
    pub fn drain_sorted(&mut self) -> Vec<(usize, f64)> {
        self.cols.sort_unstable();

        let entries = self
            .cols
            .iter()
            .map(|&col| (col, self.values[col]))
            .collect();

        for &col in &self.cols {
            self.occupied[col] = false;
        }
        self.cols.clear();

        entries
    }
}
