mod common;
use common::{dense_symmetric, read_output, write_matrix_file, write_text};
use ndarray::array;
use netmat::{assemble_matrix, lower_triangle_len, skip_diagnostic, AssembleConfig, NetmatError};
use std::path::Path;

fn config(dir: &Path, dim: usize) -> AssembleConfig {
    AssembleConfig {
        source_dir: dir.join("in"),
        expected_dim: dim,
        output_path: dir.join("out.txt"),
        ..AssembleConfig::default()
    }
}

fn input_dir(root: &Path) -> std::path::PathBuf {
    let d = root.join("in");
    std::fs::create_dir_all(&d).unwrap();
    d
}

#[test]
fn wrong_shape_file_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(3, 1.0));
    write_matrix_file(&dir, "b.txt", &dense_symmetric(2, 2.0));
    write_matrix_file(&dir, "c.txt", &dense_symmetric(3, 3.0));

    let cfg = config(tmp.path(), 3);
    let out = assemble_matrix(&cfg).unwrap();

    assert_eq!(out.features.dim(), (2, 3));
    assert_eq!(out.subjects, vec!["a", "c"]);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].file_name, "b.txt");
    assert_eq!(out.skipped[0].shape, (2, 2));
    assert_eq!(read_output(&cfg.output_path).len(), 2);
}

#[test]
fn non_square_file_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(3, 1.0));
    write_text(&dir, "b.txt", "1,2,3\n4,5,6\n");

    let out = assemble_matrix(&config(tmp.path(), 3)).unwrap();
    assert_eq!(out.subjects, vec!["a"]);
    assert_eq!(out.skipped[0].shape, (2, 3));
}

#[test]
fn unequal_nonzero_counts_fail() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    // Two nonzero sub-diagonal entries.
    write_matrix_file(&dir, "a.txt", &array![[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.7, 1.0]]);
    // Three.
    write_matrix_file(&dir, "b.txt", &array![[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.2, 0.7, 1.0]]);

    let cfg = config(tmp.path(), 3);
    match assemble_matrix(&cfg) {
        Err(e @ NetmatError::InconsistentRowLength { .. }) => {
            assert!(e.to_string().contains("inconsistent row length"));
            if let NetmatError::InconsistentRowLength { expected, found, subject, .. } = e {
                assert_eq!((expected, found), (2, 3));
                assert_eq!(subject, "b");
            }
        }
        other => panic!("expected InconsistentRowLength, got {other:?}"),
    }
    assert!(!cfg.output_path.exists(), "no output on stacking failure");
}

#[test]
fn unequal_nonzero_counts_padded_when_enabled() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &array![[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.7, 1.0]]);
    write_matrix_file(&dir, "b.txt", &array![[1.0, 0.0, 0.0], [0.5, 1.0, 0.0], [0.2, 0.7, 1.0]]);

    let cfg = AssembleConfig { pad_missing_as_zero: true, ..config(tmp.path(), 3) };
    let out = assemble_matrix(&cfg).unwrap();
    assert!(out.padded);
    assert_eq!(read_output(&cfg.output_path), vec![vec![0.5, 0.7, 0.0], vec![0.5, 0.2, 0.7]]);
}

#[test]
fn empty_directory_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_text(&dir, "notes.md", "not a matrix");

    let cfg = config(tmp.path(), 3);
    assert!(matches!(assemble_matrix(&cfg), Err(NetmatError::NoValidFiles { .. })));
    assert!(!cfg.output_path.exists());
}

#[test]
fn all_files_skipped_is_no_valid_files() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(4, 1.0));

    let cfg = config(tmp.path(), 3);
    let collection = netmat::collect(&cfg).unwrap();
    assert_eq!(collection.skipped.len(), 1);
    assert!(matches!(collection.into_assembly(&cfg), Err(NetmatError::NoValidFiles { .. })));
}

#[test]
fn rows_follow_sorted_file_names() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    // Written out of order on purpose.
    for (name, seed) in [("300.txt", 3.0), ("100.txt", 1.0), ("200.txt", 2.0)] {
        write_matrix_file(&dir, name, &dense_symmetric(4, seed));
    }

    let cfg = config(tmp.path(), 4);
    let out = assemble_matrix(&cfg).unwrap();
    assert_eq!(out.subjects, vec!["100", "200", "300"]);
    assert_eq!(out.features.ncols(), lower_triangle_len(4));

    let rows = read_output(&cfg.output_path);
    for (i, seed) in [1.0, 2.0, 3.0].into_iter().enumerate() {
        // First sub-diagonal entry is (1, 0) → seed + 1 * 0.01.
        approx::assert_abs_diff_eq!(rows[i][0], seed + 0.01, epsilon = 1e-12);
    }
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    for (name, seed) in [("b.txt", 0.3), ("a.txt", -0.2)] {
        write_matrix_file(&dir, name, &dense_symmetric(5, seed));
    }

    let cfg = config(tmp.path(), 5);
    assemble_matrix(&cfg).unwrap();
    let first = std::fs::read(&cfg.output_path).unwrap();
    assemble_matrix(&cfg).unwrap();
    let second = std::fs::read(&cfg.output_path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_uses_scientific_notation() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &array![[1.0, 0.25], [0.25, 1.0]]);

    let cfg = config(tmp.path(), 2);
    assemble_matrix(&cfg).unwrap();
    let text = std::fs::read_to_string(&cfg.output_path).unwrap();
    assert_eq!(text, "2.500000000000000000e-01\n");
}

#[test]
fn manifest_records_subject_order() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "s2.txt", &dense_symmetric(3, 1.0));
    write_matrix_file(&dir, "s1.txt", &dense_symmetric(3, 2.0));
    write_matrix_file(&dir, "bad.txt", &dense_symmetric(2, 2.0));

    let manifest = tmp.path().join("out.json");
    let cfg = AssembleConfig { manifest_path: Some(manifest.clone()), ..config(tmp.path(), 3) };
    assemble_matrix(&cfg).unwrap();

    let v: serde_json::Value = serde_json::from_slice(&std::fs::read(&manifest).unwrap()).unwrap();
    assert_eq!(v["shape"], serde_json::json!([2, 3]));
    assert_eq!(v["subjects"], serde_json::json!(["s1", "s2"]));
    assert_eq!(v["skipped"][0]["file"], "bad.txt");
    assert_eq!(v["padded"], false);
}

#[test]
fn malformed_file_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(2, 1.0));
    write_text(&dir, "b.txt", "1,oops\n2,1\n");

    assert!(matches!(
        assemble_matrix(&config(tmp.path(), 2)),
        Err(NetmatError::Parse { line: 1, column: 2, .. })
    ));
}

#[test]
fn skips_reported_before_later_fatal_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(2, 1.0));
    write_matrix_file(&dir, "b.txt", &dense_symmetric(3, 1.0));
    write_text(&dir, "d.txt", "1,oops,1\n");

    let mut lines = Vec::new();
    let result = netmat::collect_with(&config(tmp.path(), 3), |s| lines.push(skip_diagnostic(s)));

    assert!(matches!(result, Err(NetmatError::Parse { .. })));
    assert_eq!(lines, vec!["ERROR: Incorrect array dimensions in file a.txt"]);
}

#[test]
fn skip_callback_matches_collected_skips() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = input_dir(tmp.path());
    write_matrix_file(&dir, "a.txt", &dense_symmetric(2, 1.0));
    write_matrix_file(&dir, "b.txt", &dense_symmetric(3, 1.0));
    write_matrix_file(&dir, "c.txt", &dense_symmetric(4, 1.0));

    let cfg = config(tmp.path(), 3);
    let mut seen = Vec::new();
    let collection = netmat::collect_with(&cfg, |s| seen.push(s.clone())).unwrap();
    assert_eq!(seen, collection.skipped);

    let assembly = collection.into_assembly(&cfg).unwrap();
    assert_eq!(netmat::shape_report(&assembly), "Resulting matrix shape: (1, 3)");
}
