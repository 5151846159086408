//! Strict lower-triangle extraction.
//!
//! Matches `arr[np.tril(arr, -1) != 0]`: every entry with `col < row` whose
//! value is nonzero, visited row-major (row ascending, then column
//! ascending).
//!
//! Zeros are dropped wherever they occur, so the vector length depends on
//! the data and not only on `S`.  NaN compares unequal to zero and is kept.
use ndarray::Array2;

/// Nonzero strict-lower-triangle entries of `matrix`, row-major.
pub fn lower_triangle_nonzero(matrix: &Array2<f64>) -> Vec<f64> {
    let n = matrix.nrows();
    let mut out = Vec::with_capacity(lower_triangle_len(n));
    for (i, row) in matrix.rows().into_iter().enumerate() {
        out.extend(row.iter().take(i).copied().filter(|&v| v != 0.0));
    }
    out
}

/// Number of strict-lower-triangle positions of an `n × n` matrix.
pub fn lower_triangle_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
