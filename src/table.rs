//! String-valued tabular datasets.
//!
//! The HCP behavioral and restricted CSVs are loaded as-is: one header row,
//! every cell kept as text.  Values are only copied into the vars table,
//! never interpreted.
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{NetmatError, Result};

/// A CSV file with a header row.
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| NetmatError::csv(path, e))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| NetmatError::csv(path, e))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| NetmatError::csv(path, e))?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(Self { path: path.to_path_buf(), headers, rows })
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| NetmatError::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    /// Keep only rows whose `column` cell is in `allow`.
    pub fn retain_subjects(&self, column: &str, allow: &HashSet<String>) -> Result<Table> {
        let idx = self.require_column(column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row.get(idx).is_some_and(|id| allow.contains(id)))
            .cloned()
            .collect();
        Ok(Table { path: self.path.clone(), headers: self.headers.clone(), rows })
    }

    /// Subject ID → index of its first row.
    pub fn first_row_by_subject(&self, column: &str) -> Result<HashMap<&str, usize>> {
        let idx = self.require_column(column)?;
        let mut out = HashMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(id) = row.get(idx) {
                out.entry(id.as_str()).or_insert(i);
            }
        }
        Ok(out)
    }
}
