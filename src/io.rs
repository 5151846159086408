//! Delimited-text I/O.
//!
//! Reader: comma-separated numeric grids (one connectivity matrix per file)
//! and newline-delimited lists.  Writer: the stacked feature matrix in the
//! same layout `numpy.savetxt(..., delimiter=',')` produces, plus a JSON
//! manifest and the string-valued vars table.
use ndarray::Array2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{NetmatError, Result};

// ── Numeric matrix reader ─────────────────────────────────────────────────────

/// Parse one cell.  Empty cells become NaN, like `genfromtxt` missing values.
fn parse_cell(cell: &str, path: &Path, line: usize, column: usize) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| NetmatError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        value: cell.to_string(),
    })
}

/// Read a comma-delimited numeric file into `[rows, cols]`.
///
/// Every line must have the same number of fields.  An empty file yields a
/// `0 × 0` array, which never passes shape validation.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(true)
        .from_path(path)
        .map_err(|e| NetmatError::csv(path, e))?;

    let mut values: Vec<f64> = Vec::new();
    let mut n_rows = 0usize;
    let mut n_cols: Option<usize> = None;

    for result in reader.records() {
        let record = result.map_err(|e| NetmatError::csv(path, e))?;
        let line = record.position().map_or(n_rows + 1, |p| p.line() as usize);

        // A blank line comes through as a single empty field.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        match n_cols {
            None => n_cols = Some(record.len()),
            Some(expected) if expected != record.len() => {
                return Err(NetmatError::RaggedFile {
                    path: path.to_path_buf(),
                    line,
                    expected,
                    found: record.len(),
                });
            }
            Some(_) => {}
        }

        for (column, cell) in record.iter().enumerate() {
            values.push(parse_cell(cell, path, line, column + 1)?);
        }
        n_rows += 1;
    }

    let mut out = Array2::<f64>::zeros((n_rows, n_cols.unwrap_or(0)));
    for (dst, v) in out.iter_mut().zip(values) {
        *dst = v;
    }
    Ok(out)
}

// ── Line lists ────────────────────────────────────────────────────────────────

/// Read a newline-delimited list, trimming each entry and dropping blanks.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| NetmatError::io(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

// ── Writers ───────────────────────────────────────────────────────────────────

/// Format like C's `%.18e` (numpy's `savetxt` default): two-digit signed
/// exponent, lowercase `nan` / `inf`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let s = format!("{v:.18e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => s,
    }
}

/// Write `[rows, cols]` comma-delimited, one row per line, no header.
pub fn write_matrix(path: &Path, matrix: &Array2<f64>) -> Result<()> {
    let f = File::create(path).map_err(|e| NetmatError::io(path, e))?;
    let mut w = BufWriter::new(f);
    for row in matrix.rows() {
        let line = row.iter().map(|&v| format_float(v)).collect::<Vec<_>>().join(",");
        writeln!(w, "{line}").map_err(|e| NetmatError::io(path, e))?;
    }
    w.flush().map_err(|e| NetmatError::io(path, e))
}

/// Write a string table comma-delimited, no header.
pub fn write_table(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| NetmatError::csv(path, e))?;
    for row in rows {
        w.write_record(row).map_err(|e| NetmatError::csv(path, e))?;
    }
    w.flush().map_err(|e| NetmatError::io(path, e))
}

/// Pretty-print a JSON document to `path`.
pub fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| NetmatError::io(path, std::io::Error::other(e)))?;
    std::fs::write(path, bytes).map_err(|e| NetmatError::io(path, e))
}
