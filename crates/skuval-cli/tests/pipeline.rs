//! End-to-end tests: workbooks on disk through the validation stages.

mod common;

use std::path::PathBuf;

use polars::prelude::DataFrame;
use tempfile::TempDir;

use common::{row, write_input, write_master};
use skuval_cli::pipeline::{DEFAULT_OUTPUT_FILE, ValidationRequest, run_validation};
use skuval_ingest::{IngestError, column_value_text, read_workbook};

fn column_texts(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    (0..df.height())
        .map(|idx| column_value_text(df, name, idx))
        .collect()
}

#[test]
fn test_round_trip_keeps_only_valid_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        &[
            row(Some("x"), Some("ABC123"), Some("3")),
            row(None, None, Some("5")),
            row(Some("y"), Some("ABC123"), Some("0")),
            row(Some("z"), Some("ZZZ999"), Some("2")),
            row(Some("w"), Some(" DEF456 "), Some("7")),
        ],
    );
    let master = write_master(
        dir.path(),
        vec![
            ("Наименование", vec!["Widget", "Gadget"]),
            ("Артикул", vec!["ABC123", "DEF456"]),
        ],
    );
    let output = dir.path().join("out").join("validated.xlsx");

    let request = ValidationRequest::new(&input, &master).with_output(&output);
    let result = run_validation(&request).unwrap();

    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    assert_eq!(result.input_rows(), 5);
    assert_eq!(result.output_rows, 2);
    assert_eq!(result.reference_column, "Артикул");

    let written = read_workbook(&output).unwrap();
    let names: Vec<&str> = written
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, vec!["D", "N", "O", "Q", "S"]);
    assert_eq!(
        column_texts(&written, "D"),
        vec![Some("x".to_string()), Some("w".to_string())]
    );
    assert_eq!(column_texts(&written, "N"), vec![None, None]);
    assert_eq!(
        column_texts(&written, "S"),
        vec![Some("3".to_string()), Some("7".to_string())]
    );
}

#[test]
fn test_no_surviving_rows_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        &[
            row(None, None, Some("5")),
            row(Some("x"), Some("ABC123"), None),
        ],
    );
    let master = write_master(dir.path(), vec![("Артикул", vec!["ABC123"])]);
    let output = dir.path().join("empty.xlsx");

    let request = ValidationRequest::new(&input, &master).with_output(&output);
    let result = run_validation(&request).unwrap();

    assert_eq!(result.output_rows, 0);
    let written = read_workbook(&output).unwrap();
    assert_eq!(written.height(), 0);
    assert_eq!(written.width(), 5);
}

#[test]
fn test_master_first_column_fallback() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), &[row(Some("x"), Some("ZZZ999"), Some("1"))]);
    let master = write_master(
        dir.path(),
        vec![("Code", vec!["ZZZ999"]), ("Name", vec!["Widget"])],
    );
    let output = dir.path().join("out.xlsx");

    let request = ValidationRequest::new(&input, &master).with_output(&output);
    let result = run_validation(&request).unwrap();

    assert_eq!(result.reference_column, "Code");
    assert_eq!(result.output_rows, 1);
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let master = write_master(dir.path(), vec![("Артикул", vec!["ABC123"])]);
    let output = dir.path().join("out.xlsx");

    let request =
        ValidationRequest::new(dir.path().join("missing.xlsx"), &master).with_output(&output);
    let error = run_validation(&request).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<IngestError>(),
        Some(IngestError::FileNotFound { .. })
    ));
    assert!(error.to_string().contains("missing.xlsx"));
    assert!(!output.exists());
}

#[test]
fn test_missing_master_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), &[row(Some("x"), Some("ABC123"), Some("1"))]);
    let output = dir.path().join("out.xlsx");

    let request =
        ValidationRequest::new(&input, dir.path().join("no-master.xlsx")).with_output(&output);
    let error = run_validation(&request).unwrap_err();

    assert!(error.to_string().contains("no-master.xlsx"));
    assert!(!output.exists());
}

#[test]
fn test_dry_run_skips_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), &[row(Some("x"), Some("ABC123"), Some("1"))]);
    let master = write_master(dir.path(), vec![("Артикул", vec!["ABC123"])]);
    let output = dir.path().join("out.xlsx");

    let mut request = ValidationRequest::new(&input, &master).with_output(&output);
    request.dry_run = true;
    let result = run_validation(&request).unwrap();

    assert!(result.output.is_none());
    assert_eq!(result.output_rows, 1);
    assert!(!output.exists());
}

#[test]
fn test_default_output_path() {
    let request = ValidationRequest::new("in.xlsx", "master.xlsx");
    assert_eq!(request.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
    assert_eq!(DEFAULT_OUTPUT_FILE, "validated_output.xlsx");
}
