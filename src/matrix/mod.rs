//! Sparse matrix storage and prolongation assembly
//!
//! This module contains the CSR container used as the read-only operator
//! graph and the row-by-row builder for the prolongation matrix.

pub mod builder;
pub mod csr;

pub use builder::ProlongationBuilder;
pub use csr::SparseMatrixCSR;
