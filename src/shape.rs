//! Shape validation.
//!
//! A connectivity matrix is accepted only when it is exactly `S × S`, where
//! `S` is the parcellation size the run was configured with.
use ndarray::Array2;

/// `true` iff `matrix` has `expected_dim` rows and `expected_dim` columns.
pub fn has_expected_shape(matrix: &Array2<f64>, expected_dim: usize) -> bool {
    let (n_rows, n_cols) = matrix.dim();
    n_rows == expected_dim && n_cols == expected_dim
}
