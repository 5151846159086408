//! Error types shared by the matrix assembler and the vars table builder.
//!
//! Only fatal conditions live here.  A connectivity file with the wrong
//! shape is *not* an error: it is recorded as a [`SkippedFile`] in the
//! assembly report and processing continues.
//!
//! [`SkippedFile`]: crate::assemble::SkippedFile
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort an assembly or vars run.
#[derive(Debug, Error)]
pub enum NetmatError {
    /// A configuration value failed eager validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A cell of a numeric matrix file is not a number.
    #[error("{}:{line}: column {column}: '{value}' is not a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
    },

    /// Rows of one matrix file have different widths.
    #[error("{}:{line}: expected {expected} fields, found {found}", .path.display())]
    RaggedFile {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Feature vectors of accepted subjects cannot be stacked into a
    /// rectangular matrix.
    #[error(
        "inconsistent row length: subject '{expected_subject}' has {expected} features \
         but subject '{subject}' has {found}"
    )]
    InconsistentRowLength {
        expected: usize,
        expected_subject: String,
        found: usize,
        subject: String,
    },

    /// No file in the source directory passed discovery and shape validation.
    #[error("no valid '*{suffix}' matrix files found in {}", .dir.display())]
    NoValidFiles { dir: PathBuf, suffix: String },

    /// A tabular dataset lacks a required column.
    #[error("{} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// Listed subjects with no row in a dataset.
    #[error("subject(s) not found in {dataset} data: {}", .subjects.join(", "))]
    MissingSubjects {
        dataset: String,
        subjects: Vec<String>,
    },

    /// A column-spec entry present in neither dataset.
    #[error("variable '{column}' not found in any dataset")]
    UnknownVariable { column: String },
}

impl NetmatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, NetmatError>;
