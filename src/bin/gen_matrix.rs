use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use netmat::AssembleConfig;

#[derive(Parser)]
#[command(
    name = "gen_matrix",
    about = "Stack per-subject connectivity matrices into one subjects × edges matrix"
)]
struct Args {
    /// Directory holding one comma-delimited S × S matrix file per subject
    directory: PathBuf,

    /// Parcellation size S (e.g. 200)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    expected_dim: u64,

    /// Output file (default: N1_Matrix.txt)
    #[arg(default_value = "N1_Matrix.txt")]
    output: PathBuf,

    /// Suffix of matrix files; other files are ignored
    #[arg(long, default_value = ".txt")]
    suffix: String,

    /// Zero-pad short feature vectors instead of failing (lossy)
    #[arg(long)]
    pad_missing_as_zero: bool,

    /// Also write a JSON manifest of subject order and skipped files
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = AssembleConfig {
        source_dir: args.directory,
        expected_dim: usize::try_from(args.expected_dim).context("expected dimension too large")?,
        output_path: args.output,
        suffix: args.suffix,
        pad_missing_as_zero: args.pad_missing_as_zero,
        manifest_path: args.manifest,
    };
    cfg.validate()?;

    let collection = netmat::collect_with(&cfg, |skipped| {
        println!("{}", netmat::skip_diagnostic(skipped));
    })
    .with_context(|| format!("reading matrices from {}", cfg.source_dir.display()))?;
    if collection.rows.is_empty() {
        println!("{}", netmat::empty_report(&collection));
    }

    let assembly = collection.into_assembly(&cfg)?;
    println!("{}", netmat::shape_report(&assembly));

    netmat::write_assembly(&assembly, &cfg)
        .with_context(|| format!("writing {}", cfg.output_path.display()))?;
    Ok(())
}
