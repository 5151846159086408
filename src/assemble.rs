//! Connectivity matrix assembly.
//!
//! ```text
//! source_dir/*.txt   (sorted by file name)
//!   │
//!   ├─ io::read_matrix()               comma-delimited → [S, S] f64
//!   ├─ shape::has_expected_shape()     wrong shape → SkippedFile, continue
//!   ├─ tril::lower_triangle_nonzero()  nonzero strict lower triangle
//!   │
//!   └─ stack_features()                Vec<Vec<f64>> → [N, E] f64
//! ```
//!
//! Collection and stacking are separate steps so callers can report the
//! skipped files even when stacking fails.
use log::{debug, info, warn};
use ndarray::Array2;
use std::path::{Path, PathBuf};

use crate::config::AssembleConfig;
use crate::error::{NetmatError, Result};
use crate::{io, shape, tril};

/// A matrix file rejected by shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file_name: String,
    /// `(rows, cols)` as loaded.
    pub shape: (usize, usize),
}

/// Per-subject feature vectors before stacking.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Subject IDs, one per accepted file, in processing order.
    pub subjects: Vec<String>,
    /// Feature vectors, parallel to `subjects`.
    pub rows: Vec<Vec<f64>>,
    pub skipped: Vec<SkippedFile>,
}

/// The stacked feature matrix.  Row `i` belongs to `subjects[i]`.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// `[n_subjects, n_features]`
    pub features: Array2<f64>,
    pub subjects: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    /// Whether any row was zero-padded.
    pub padded: bool,
}

impl Assembly {
    /// JSON summary of the run, written next to the matrix on request.
    pub fn manifest(&self) -> serde_json::Value {
        let skipped: Vec<serde_json::Value> = self
            .skipped
            .iter()
            .map(|s| serde_json::json!({ "file": s.file_name, "shape": [s.shape.0, s.shape.1] }))
            .collect();
        serde_json::json!({
            "shape": [self.features.nrows(), self.features.ncols()],
            "subjects": self.subjects,
            "skipped": skipped,
            "padded": self.padded,
        })
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Regular files in `dir` whose name ends with `suffix`, sorted by name.
///
/// Directory listing order is platform dependent; sorting makes the output
/// row order reproducible.
pub fn discover(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| NetmatError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NetmatError::io(dir, e))?;
        let path = entry.path();
        let Some(name) = path.file_name() else { continue };
        let matches = match name.to_str() {
            Some(n) => n.ends_with(suffix),
            None => {
                if name.to_string_lossy().ends_with(suffix) {
                    warn!("ignoring {}: file name is not valid UTF-8", path.display());
                }
                false
            }
        };
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// File name with `suffix` removed, e.g. `100307.txt` → `100307`.
pub fn subject_id(path: &Path, suffix: &str) -> String {
    let name = file_name(path);
    name.strip_suffix(suffix).map(str::to_string).unwrap_or(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Collection ────────────────────────────────────────────────────────────────

/// Load, validate and extract every matrix file in `cfg.source_dir`.
///
/// Files of the wrong shape are recorded in [`Collection::skipped`].  Files
/// that cannot be read or parsed abort the run.
pub fn collect(cfg: &AssembleConfig) -> Result<Collection> {
    collect_with(cfg, |_| {})
}

/// Like [`collect`], but calls `on_skip` as soon as each file is rejected,
/// so skips found before a fatal error are still reported.
pub fn collect_with<F>(cfg: &AssembleConfig, mut on_skip: F) -> Result<Collection>
where
    F: FnMut(&SkippedFile),
{
    let files = discover(&cfg.source_dir, &cfg.suffix)?;
    info!(
        "found {} '*{}' files in {}",
        files.len(),
        cfg.suffix,
        cfg.source_dir.display()
    );

    let mut out = Collection::default();
    for path in &files {
        debug!("reading {}", path.display());
        let matrix = io::read_matrix(path)?;

        if !shape::has_expected_shape(&matrix, cfg.expected_dim) {
            let (r, c) = matrix.dim();
            warn!(
                "skipping {}: shape ({r}, {c}), expected ({s}, {s})",
                path.display(),
                s = cfg.expected_dim
            );
            let skipped = SkippedFile { file_name: file_name(path), shape: (r, c) };
            on_skip(&skipped);
            out.skipped.push(skipped);
            continue;
        }

        out.rows.push(tril::lower_triangle_nonzero(&matrix));
        out.subjects.push(subject_id(path, &cfg.suffix));
    }
    Ok(out)
}

// ── Stacking ──────────────────────────────────────────────────────────────────

/// Stack feature vectors into `[rows.len(), n_features]`.
///
/// With `pad_missing_as_zero == false` every row must have the length of
/// the first one.  With `true`, short rows are right-padded with zeros to
/// the longest row.  Returns the matrix and whether any row was padded.
pub fn stack_features(
    rows: &[Vec<f64>],
    subjects: &[String],
    pad_missing_as_zero: bool,
) -> Result<(Array2<f64>, bool)> {
    let Some(first) = rows.first() else {
        return Ok((Array2::zeros((0, 0)), false));
    };

    let width = if pad_missing_as_zero {
        rows.iter().map(Vec::len).max().unwrap_or(0)
    } else {
        if let Some(i) = rows.iter().position(|r| r.len() != first.len()) {
            return Err(NetmatError::InconsistentRowLength {
                expected: first.len(),
                expected_subject: subject_at(subjects, 0),
                found: rows[i].len(),
                subject: subject_at(subjects, i),
            });
        }
        first.len()
    };

    let mut padded = false;
    let mut out = Array2::<f64>::zeros((rows.len(), width));
    for (i, (mut dst, src)) in out.rows_mut().into_iter().zip(rows).enumerate() {
        if src.len() < width {
            warn!(
                "zero-padding subject '{}' from {} to {width} features",
                subject_at(subjects, i),
                src.len()
            );
            padded = true;
        }
        for (d, &v) in dst.iter_mut().zip(src) {
            *d = v;
        }
    }
    Ok((out, padded))
}

fn subject_at(subjects: &[String], i: usize) -> String {
    subjects.get(i).cloned().unwrap_or_else(|| format!("row {i}"))
}

impl Collection {
    /// Stack the collected rows.  Zero accepted files is an error.
    pub fn into_assembly(self, cfg: &AssembleConfig) -> Result<Assembly> {
        if self.rows.is_empty() {
            return Err(NetmatError::NoValidFiles {
                dir: cfg.source_dir.clone(),
                suffix: cfg.suffix.clone(),
            });
        }
        let (features, padded) =
            stack_features(&self.rows, &self.subjects, cfg.pad_missing_as_zero)?;
        info!(
            "stacked {} subjects × {} features ({} skipped)",
            features.nrows(),
            features.ncols(),
            self.skipped.len()
        );
        Ok(Assembly { features, subjects: self.subjects, skipped: self.skipped, padded })
    }
}

// ── Console reports ───────────────────────────────────────────────────────────

/// Line printed for each file rejected by shape validation.
pub fn skip_diagnostic(skipped: &SkippedFile) -> String {
    format!("ERROR: Incorrect array dimensions in file {}", skipped.file_name)
}

/// Final line of a successful assembly.
pub fn shape_report(assembly: &Assembly) -> String {
    let (rows, cols) = assembly.features.dim();
    format!("Resulting matrix shape: ({rows}, {cols})")
}

/// Line printed when no file was accepted.
pub fn empty_report(collection: &Collection) -> String {
    format!(
        "Accepted 0 files ({} skipped); nothing written",
        collection.skipped.len()
    )
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Write the feature matrix to `cfg.output_path` and, if configured, the
/// manifest to `cfg.manifest_path`.
pub fn write_assembly(assembly: &Assembly, cfg: &AssembleConfig) -> Result<()> {
    io::write_matrix(&cfg.output_path, &assembly.features)?;
    info!("wrote {}", cfg.output_path.display());
    if let Some(path) = &cfg.manifest_path {
        io::write_json(path, &assembly.manifest())?;
        info!("wrote manifest {}", path.display());
    }
    Ok(())
}
