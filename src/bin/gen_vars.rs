use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use netmat::{build_vars, write_vars, VarsConfig};

#[derive(Parser)]
#[command(
    name = "gen_vars",
    about = "Build the subjects × measures vars table from the HCP spreadsheets"
)]
struct Args {
    /// One vars column name per line (column_headers.txt)
    column_headers: PathBuf,

    /// One subject file name per line (filenames.txt)
    subject_filenames: PathBuf,

    /// Unrestricted behavioral data CSV
    behavioral: PathBuf,

    /// Restricted data CSV
    restricted: PathBuf,

    /// Output path
    #[arg(long, default_value = "vars.txt")]
    output: PathBuf,

    /// Suffix stripped from each subject file name
    #[arg(long, default_value = ".pconn.nii")]
    subject_suffix: String,

    /// Subject key column in both CSVs
    #[arg(long, default_value = "Subject")]
    subject_column: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = VarsConfig {
        column_spec_path: args.column_headers,
        subject_list_path: args.subject_filenames,
        behavioral_path: args.behavioral,
        restricted_path: args.restricted,
        output_path: args.output,
        subject_suffix: args.subject_suffix,
        subject_column: args.subject_column,
    };
    cfg.validate()?;

    let vars = build_vars(&cfg)?;
    let ((b_rows, b_cols), (b_rows_f, b_cols_f)) = vars.behavioral_shape;
    let ((r_rows, r_cols), (r_rows_f, r_cols_f)) = vars.restricted_shape;
    println!("behavioral shape before ({b_rows}, {b_cols}), after ({b_rows_f}, {b_cols_f})");
    println!("restricted shape before ({r_rows}, {r_cols}), after ({r_rows_f}, {r_cols_f})");

    write_vars(&vars, &cfg.output_path)
        .with_context(|| format!("writing {}", cfg.output_path.display()))?;
    println!(
        "vars shape: ({}, {}) → {}",
        vars.rows.len(),
        vars.columns.len(),
        cfg.output_path.display()
    );
    Ok(())
}
