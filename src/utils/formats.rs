//! Utilities for converting between our matrix format and external libraries
//!
//! The prolongation matrix is handed to an external multigrid driver for the
//! Galerkin product `A_c = Pᵀ A P`; these conversions bridge to the sprs
//! ecosystem for that purpose.

use crate::matrix::SparseMatrixCSR;
use num_traits::Num;
use sprs::CsMat;

/// Converts our CSR matrix format to sprs CsMat format
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    CsMat::new(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_ptr.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts an sprs CsMat to our SparseMatrixCSR format
///
/// The matrix is converted to CSR storage first if needed.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let original = SparseMatrixCSR::tridiagonal(4, 2.0, -1.0);

        let sprs_matrix = to_sprs_csr(&original);
        assert_eq!(sprs_matrix.rows(), 4);
        assert_eq!(sprs_matrix.cols(), 4);
        assert_eq!(sprs_matrix.nnz(), original.nnz());

        let back = from_sprs_csr(sprs_matrix);
        assert_eq!(back, original);
    }

    #[test]
    fn test_rectangular_matrix() {
        // Prolongation matrices are rectangular (N rows, C coarse columns)
        let p = SparseMatrixCSR::new(
            3, 2,
            vec![0, 1, 3, 4],
            vec![0, 0, 1, 1],
            vec![1.0, 0.5, 0.5, 1.0],
        );

        let sprs_p = to_sprs_csr(&p);
        assert_eq!(sprs_p.rows(), 3);
        assert_eq!(sprs_p.cols(), 2);
    }
}
