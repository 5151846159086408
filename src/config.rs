//! Run configuration.
//!
//! [`AssembleConfig`] drives the connectivity matrix assembler and
//! [`VarsConfig`] drives the vars table builder.  Both are plain structs
//! with `pub` fields and a [`Default`] so callers can use struct-update
//! syntax; call `validate()` before running.
use std::path::PathBuf;

use crate::error::{NetmatError, Result};

/// Configuration for [`assemble_matrix`](crate::assemble_matrix).
///
/// ```
/// use netmat::AssembleConfig;
///
/// let cfg = AssembleConfig {
///     source_dir:   "netmats/".into(),
///     expected_dim: 200,
///     ..AssembleConfig::default()
/// };
/// assert_eq!(cfg.suffix, ".txt");
/// ```
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Directory holding one connectivity matrix file per subject.
    pub source_dir: PathBuf,

    /// Parcellation size `S`: accepted files are exactly `S × S`.
    ///
    /// Default: `200`.
    pub expected_dim: usize,

    /// Where the stacked feature matrix is written.
    ///
    /// Default: `N1_Matrix.txt`.
    pub output_path: PathBuf,

    /// File-name suffix of matrix files.  Anything else in `source_dir`
    /// is ignored.  Also stripped from the file name to get the subject ID.
    ///
    /// Default: `".txt"`.
    pub suffix: String,

    /// Zero-pad feature vectors shorter than the longest one instead of
    /// failing.
    ///
    /// Extraction drops exact zeros, so padded rows are no longer aligned
    /// edge-for-edge with the others.  Only use this when a lossy matrix is
    /// acceptable.
    ///
    /// Default: `false`.
    pub pad_missing_as_zero: bool,

    /// Optional JSON manifest recording subject order, skipped files and
    /// the output shape.
    pub manifest_path: Option<PathBuf>,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            expected_dim: 200,
            output_path: PathBuf::from("N1_Matrix.txt"),
            suffix: ".txt".to_string(),
            pad_missing_as_zero: false,
            manifest_path: None,
        }
    }
}

impl AssembleConfig {
    /// Check every field before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.expected_dim == 0 {
            return Err(NetmatError::InvalidConfig(
                "expected dimension must be a positive integer".into(),
            ));
        }
        if self.suffix.is_empty() {
            return Err(NetmatError::InvalidConfig("file suffix must not be empty".into()));
        }
        if !self.source_dir.is_dir() {
            return Err(NetmatError::InvalidConfig(format!(
                "source directory {} does not exist or is not a directory",
                self.source_dir.display()
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(NetmatError::InvalidConfig("output path must not be empty".into()));
        }
        Ok(())
    }
}

/// Configuration for [`build_vars`](crate::vars::build_vars).
#[derive(Debug, Clone)]
pub struct VarsConfig {
    /// One output column name per line, in output order.
    pub column_spec_path: PathBuf,
    /// One subject file name per line.
    pub subject_list_path: PathBuf,
    /// Unrestricted behavioral data (CSV with header).
    pub behavioral_path: PathBuf,
    /// Restricted data (CSV with header).
    pub restricted_path: PathBuf,
    /// Default: `vars.txt`.
    pub output_path: PathBuf,
    /// Stripped from each subject-list entry.  Default: `".pconn.nii"`.
    pub subject_suffix: String,
    /// Name of the subject key column in both datasets.  Default: `"Subject"`.
    pub subject_column: String,
}

impl Default for VarsConfig {
    fn default() -> Self {
        Self {
            column_spec_path: PathBuf::from("column_headers.txt"),
            subject_list_path: PathBuf::from("filenames.txt"),
            behavioral_path: PathBuf::new(),
            restricted_path: PathBuf::new(),
            output_path: PathBuf::from("vars.txt"),
            subject_suffix: ".pconn.nii".to_string(),
            subject_column: "Subject".to_string(),
        }
    }
}

impl VarsConfig {
    pub fn validate(&self) -> Result<()> {
        for (what, p) in [
            ("column spec", &self.column_spec_path),
            ("subject list", &self.subject_list_path),
            ("behavioral data", &self.behavioral_path),
            ("restricted data", &self.restricted_path),
        ] {
            if !p.is_file() {
                return Err(NetmatError::InvalidConfig(format!(
                    "{what} file {} does not exist",
                    p.display()
                )));
            }
        }
        if self.subject_column.is_empty() {
            return Err(NetmatError::InvalidConfig("subject column must not be empty".into()));
        }
        Ok(())
    }
}
