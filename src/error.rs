//! Error types for prolongation construction

use thiserror::Error;

/// Result type alias using rsamg's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a prolongation operator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The strength threshold is outside its valid range (0, 1]
    #[error("interpolation threshold theta = {theta} outside (0, 1]")]
    InvalidTheta {
        /// The rejected threshold value
        theta: f64,
    },

    /// An indirect pass made no progress while unassigned nodes remain
    ///
    /// The matrix graph has a component of fine nodes with no path to any
    /// coarse node; the hierarchy cannot be built from this classification.
    #[error("indirect interpolation stalled at pass {pass} with {} unassigned nodes: {stuck:?}", stuck.len())]
    Stall {
        /// Pass number that made no progress
        pass: u32,
        /// Indices of the nodes that could not be assigned
        stuck: Vec<usize>,
    },

    /// The interpolatory weights of a row summed to zero
    ///
    /// The row-sum scaling factor alpha is undefined in this case. Raised
    /// only under [`DegeneracyPolicy::Error`](crate::DegeneracyPolicy).
    #[error("interpolatory weight sum is zero at node {node}")]
    NumericDegeneracy {
        /// The affected row index
        node: usize,
    },
}
