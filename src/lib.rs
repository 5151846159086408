//! # netmat — HCP netmat feature assembly in Rust
//!
//! `netmat` prepares Human Connectome Project connectivity data for a
//! downstream canonical-correlation analysis.  It does two independent jobs:
//!
//! 1. **Matrix assembly**: read one `S × S` connectivity matrix per subject,
//!    keep the nonzero entries of its strict lower triangle, and stack the
//!    per-subject vectors into one `[subjects, edges]` feature matrix.
//! 2. **Vars table**: join a subject list against the behavioral and
//!    restricted HCP spreadsheets and lay out one row per subject, one column
//!    per requested measure.
//!
//! ## Assembly pipeline
//!
//! ```text
//! netmats/*.txt  (sorted by file name)
//!   │
//!   ├─ io::read_matrix()              comma-delimited text → [S, S] f64
//!   ├─ shape::has_expected_shape()    not S × S → skipped, logged
//!   ├─ tril::lower_triangle_nonzero() nonzero entries with col < row
//!   ├─ assemble::stack_features()     equal lengths or error (or zero-pad)
//!   │
//!   └─→ io::write_matrix()            [N, E] f64, `%.18e`, comma-delimited
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use netmat::{assemble_matrix, AssembleConfig};
//!
//! let cfg = AssembleConfig {
//!     source_dir:   "netmats/3T_HCP500_MSMAll_d200_ts2".into(),
//!     expected_dim: 200,
//!     output_path:  "HCP_500_NET.txt".into(),
//!     ..AssembleConfig::default()
//! };
//! let out = assemble_matrix(&cfg).unwrap();
//! println!("{} subjects × {} edges", out.features.nrows(), out.features.ncols());
//! ```
//!
//! ## Running individual steps
//!
//! ```no_run
//! use netmat::io::read_matrix;
//! use netmat::shape::has_expected_shape;
//! use netmat::tril::lower_triangle_nonzero;
//! use std::path::Path;
//!
//! let m = read_matrix(Path::new("netmats/100307.txt")).unwrap();
//! if has_expected_shape(&m, 200) {
//!     let edges = lower_triangle_nonzero(&m);
//!     println!("{} edges", edges.len());
//! }
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod io;
pub mod shape;
pub mod table;
pub mod tril;
pub mod vars;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{AssembleConfig, VarsConfig};

// error
pub use error::{NetmatError, Result};

// assemble
pub use assemble::{collect, collect_with, discover, stack_features, subject_id, write_assembly};
pub use assemble::{empty_report, shape_report, skip_diagnostic};
pub use assemble::{Assembly, Collection, SkippedFile};

// io
pub use io::{format_float, read_lines, read_matrix, write_matrix};

// shape / tril
pub use shape::has_expected_shape;
pub use tril::{lower_triangle_len, lower_triangle_nonzero};

// table / vars
pub use table::Table;
pub use vars::{build_vars, write_vars, VarsTable};

/// Run the **full matrix assembly** described by `cfg`.
///
/// # Steps
///
/// 1. Validate `cfg` ([`AssembleConfig::validate`]).
/// 2. List `cfg.source_dir` for files ending in [`AssembleConfig::suffix`],
///    sorted by file name.
/// 3. Read each file; skip (and log) any that is not
///    `expected_dim × expected_dim`.
/// 4. Extract the nonzero strict-lower-triangle entries of each accepted
///    matrix, row-major.
/// 5. Stack the vectors.  Unequal lengths are an error unless
///    [`AssembleConfig::pad_missing_as_zero`] is set.
/// 6. Write the matrix to [`AssembleConfig::output_path`] (and the manifest,
///    if configured).
///
/// # Errors
///
/// * [`NetmatError::InvalidConfig`] — bad configuration.
/// * [`NetmatError::Parse`] / [`NetmatError::RaggedFile`] — a matrix file is
///   not a numeric grid.
/// * [`NetmatError::NoValidFiles`] — nothing was accepted; no output is
///   written.
/// * [`NetmatError::InconsistentRowLength`] — feature vectors differ in
///   length and padding is off; no output is written.
pub fn assemble_matrix(cfg: &AssembleConfig) -> Result<Assembly> {
    cfg.validate()?;
    let assembly = assemble::collect(cfg)?.into_assembly(cfg)?;
    assemble::write_assembly(&assembly, cfg)?;
    Ok(assembly)
}
