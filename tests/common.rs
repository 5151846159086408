/// Shared helpers for writing fixture files into temp directories.
use ndarray::Array2;
use std::path::{Path, PathBuf};

#[allow(unused)]
/// Write `m` as comma-delimited text to `dir/name`.
pub fn write_matrix_file(dir: &Path, name: &str, m: &Array2<f64>) -> PathBuf {
    let body: String = m
        .rows()
        .into_iter()
        .map(|r| r.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",") + "\n")
        .collect();
    let path = dir.join(name);
    std::fs::write(&path, body)
        .unwrap_or_else(|_| panic!("cannot write fixture {}", path.display()));
    path
}

#[allow(unused)]
/// Symmetric `n × n` matrix with unit diagonal and nonzero off-diagonal
/// entries that differ per `seed`.
pub fn dense_symmetric(n: usize, seed: f64) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j { 1.0 } else { seed + (i.min(j) * n + i.max(j)) as f64 * 0.01 }
    })
}

#[allow(unused)]
/// Write raw text to `dir/name`.
pub fn write_text(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body)
        .unwrap_or_else(|_| panic!("cannot write fixture {}", path.display()));
    path
}

#[allow(unused)]
/// Parse a comma-delimited output file back into rows of f64.
pub fn read_output(path: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("output not found: {}", path.display()))
        .lines()
        .map(|l| l.split(',').map(|v| v.parse::<f64>().unwrap()).collect())
        .collect()
}
