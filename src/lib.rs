//! # rsamg: Ruge-Stueben AMG prolongation construction
//!
//! This library builds the prolongation (interpolation) operator for
//! classical Ruge-Stueben algebraic multigrid from a sparse operator matrix
//! and a coarse/fine node splitting.
//!
//! ## Overview
//!
//! Given a CSR matrix A and a classification of its rows into coarse and
//! fine nodes (produced by an external strength-of-connection coarsening
//! step), the library computes the sparse N × C prolongation matrix P used
//! by a multigrid driver to form the coarse operator `A_c = Pᵀ A P`:
//!
//! - Coarse nodes interpolate to themselves with weight 1.
//! - Isolated nodes (no off-diagonal couplings, typically Dirichlet
//!   boundary rows) get empty rows.
//! - Fine nodes with a strong negative connection to a coarse neighbor are
//!   resolved by **direct interpolation**, with weights scaled to satisfy
//!   the row-sum condition.
//! - Remaining fine nodes are resolved by **indirect interpolation**:
//!   their connections are composed with the already-committed rows of
//!   their neighbors, over as many passes as needed. A pass that makes no
//!   progress reports the stuck nodes as a [`Error::Stall`].
//!
//! ## Usage
//!
//! ```
//! use rsamg::{build_prolongation, Coarsening, InterpolationConfig, SparseMatrixCSR};
//!
//! // 1-D Laplacian on 5 unknowns, coarse nodes at the ends
//! let a = SparseMatrixCSR::tridiagonal(5, 2.0, -1.0);
//! let coarsening = Coarsening::from_coarse_set(5, &[0, 4]);
//! let config = InterpolationConfig::with_theta(0.25);
//!
//! let result = build_prolongation(&a, &coarsening, &config).unwrap();
//!
//! // Node 2 has no coarse neighbor and is resolved indirectly in pass 2
//! assert_eq!(result.passes, 2);
//! assert_eq!(result.matrix.n_rows, 5);
//! assert_eq!(result.matrix.n_cols, 2);
//! ```
//!
//! For large matrices, [`build_prolongation_parallel`] evaluates the rows
//! of each pass with rayon and produces an identical result.

pub mod classify;
pub mod config;
pub mod error;
pub mod interp;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use classify::{Coarsening, NodeState};
pub use config::{DegeneracyPolicy, InterpolationConfig};
pub use error::{Error, Result};
pub use interp::{build_prolongation, CoarseAccumulator, Prolongation};
pub use matrix::{ProlongationBuilder, SparseMatrixCSR};
pub use parallel::build_prolongation_parallel;
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the rsamg library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
