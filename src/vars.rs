//! The subjects × measures "vars" table.
//!
//! Joins the subject list against the behavioral and restricted datasets
//! and lays the measures out in column-spec order:
//!
//! ```text
//! filenames.txt ──strip suffix──► subjects ──┐
//! column_headers.txt ─────────────► columns ─┤
//! behavioral.csv ──retain_subjects──────────┤──► [N subjects, M columns]
//! restricted.csv ──retain_subjects──────────┘
//! ```
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::VarsConfig;
use crate::error::{NetmatError, Result};
use crate::io;
use crate::table::Table;

/// Cell text for a missing value.
pub const MISSING: &str = "NaN";

/// The built table and dataset shapes before/after filtering.
#[derive(Debug, Clone)]
pub struct VarsTable {
    pub subjects: Vec<String>,
    pub columns: Vec<String>,
    /// `[subjects.len()][columns.len()]`
    pub rows: Vec<Vec<String>>,
    pub behavioral_shape: ((usize, usize), (usize, usize)),
    pub restricted_shape: ((usize, usize), (usize, usize)),
}

/// Subject list with `suffix` removed from each entry that carries it.
///
/// Repeated subjects keep their first position; later repeats are dropped
/// so the vars table has one row per subject.
pub fn read_subject_list(path: &Path, suffix: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in io::read_lines(path)? {
        let id = line.strip_suffix(suffix).map(str::to_string).unwrap_or(line);
        if seen.insert(id.clone()) {
            out.push(id);
        } else {
            warn!("{}: subject '{id}' listed more than once", path.display());
        }
    }
    Ok(out)
}

/// Subjects with no row in `table`.
pub fn missing_subjects(table: &Table, column: &str, subjects: &[String]) -> Result<Vec<String>> {
    let present = table.first_row_by_subject(column)?;
    Ok(subjects
        .iter()
        .filter(|s| !present.contains_key(s.as_str()))
        .cloned()
        .collect())
}

fn ensure_present(table: &Table, dataset: &str, column: &str, subjects: &[String]) -> Result<()> {
    let missing = missing_subjects(table, column, subjects)?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(NetmatError::MissingSubjects { dataset: dataset.to_string(), subjects: missing })
    }
}

fn cell(table: &Table, index: &HashMap<&str, usize>, subject: &str, col: usize) -> String {
    index
        .get(subject)
        .and_then(|&r| table.rows[r].get(col))
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| MISSING.to_string())
}

/// Lay out one row per subject, one column per entry of `columns`.
///
/// Each column is taken from `behavioral` when it has it, else from
/// `restricted`.  Both tables must already contain every subject.
pub fn build_rows(
    subjects: &[String],
    columns: &[String],
    behavioral: &Table,
    restricted: &Table,
    subject_column: &str,
) -> Result<Vec<Vec<String>>> {
    enum Source {
        Behavioral(usize),
        Restricted(usize),
    }

    let sources: Vec<Source> = columns
        .iter()
        .map(|c| {
            if let Some(i) = behavioral.column_index(c) {
                Ok(Source::Behavioral(i))
            } else if let Some(i) = restricted.column_index(c) {
                Ok(Source::Restricted(i))
            } else {
                Err(NetmatError::UnknownVariable { column: c.clone() })
            }
        })
        .collect::<Result<_>>()?;

    let b_rows = behavioral.first_row_by_subject(subject_column)?;
    let r_rows = restricted.first_row_by_subject(subject_column)?;
    Ok(subjects
        .iter()
        .map(|s| {
            sources
                .iter()
                .map(|src| match *src {
                    Source::Behavioral(c) => cell(behavioral, &b_rows, s, c),
                    Source::Restricted(c) => cell(restricted, &r_rows, s, c),
                })
                .collect()
        })
        .collect())
}

/// Load every input named in `cfg` and build the vars table.
pub fn build_vars(cfg: &VarsConfig) -> Result<VarsTable> {
    let columns = io::read_lines(&cfg.column_spec_path)?;
    let subjects = read_subject_list(&cfg.subject_list_path, &cfg.subject_suffix)?;
    info!("{} subjects, {} columns", subjects.len(), columns.len());

    let allow: HashSet<String> = subjects.iter().cloned().collect();

    let behavioral_all = Table::read(&cfg.behavioral_path)?;
    let restricted_all = Table::read(&cfg.restricted_path)?;
    info!("behavioral shape before {:?}", behavioral_all.shape());
    info!("restricted shape before {:?}", restricted_all.shape());

    let behavioral = behavioral_all.retain_subjects(&cfg.subject_column, &allow)?;
    let restricted = restricted_all.retain_subjects(&cfg.subject_column, &allow)?;
    info!("behavioral shape after {:?}", behavioral.shape());
    info!("restricted shape after {:?}", restricted.shape());

    ensure_present(&behavioral, "behavioral", &cfg.subject_column, &subjects)?;
    ensure_present(&restricted, "restricted", &cfg.subject_column, &subjects)?;

    let rows = build_rows(&subjects, &columns, &behavioral, &restricted, &cfg.subject_column)?;

    Ok(VarsTable {
        behavioral_shape: (behavioral_all.shape(), behavioral.shape()),
        restricted_shape: (restricted_all.shape(), restricted.shape()),
        subjects,
        columns,
        rows,
    })
}

/// Write the vars table comma-delimited, no header.
pub fn write_vars(vars: &VarsTable, path: &Path) -> Result<()> {
    io::write_table(path, &vars.rows)?;
    info!("wrote {} × {} vars to {}", vars.rows.len(), vars.columns.len(), path.display());
    Ok(())
}
