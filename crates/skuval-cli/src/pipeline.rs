//! Validation run with explicit stages.
//!
//! 1. **Check**: both source paths exist and are files
//! 2. **Load**: read the first sheet of the input and master workbooks
//! 3. **Filter**: run the row filter pipeline
//! 4. **Output**: write the surviving rows unless this is a dry run

use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use skuval_filter::{FilterConfig, FilterOutcome, run_pipeline};
use skuval_ingest::{check_source_file, read_workbook};
use skuval_output::{XlsxOptions, write_xlsx};

use crate::types::ValidationResult;

/// Output path used when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "validated_output.xlsx";

/// Everything one validation run needs.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub input: PathBuf,
    pub master: PathBuf,
    pub output: PathBuf,
    pub filter: FilterConfig,
    pub xlsx: XlsxOptions,
    pub dry_run: bool,
}

impl ValidationRequest {
    pub fn new(input: impl Into<PathBuf>, master: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            master: master.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            filter: FilterConfig::default(),
            xlsx: XlsxOptions::default(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Loaded input and master tables.
#[derive(Debug)]
pub struct LoadedTables {
    pub input: DataFrame,
    pub master: DataFrame,
}

/// Fails on the first source path that is missing. The input is checked first.
pub fn check_sources(request: &ValidationRequest) -> Result<()> {
    check_source_file(&request.input)?;
    check_source_file(&request.master)?;
    Ok(())
}

pub fn load(request: &ValidationRequest) -> Result<LoadedTables> {
    let span = info_span!("load");
    let _guard = span.enter();
    let input = read_workbook(&request.input)
        .with_context(|| format!("load input {}", request.input.display()))?;
    let master = read_workbook(&request.master)
        .with_context(|| format!("load master {}", request.master.display()))?;
    Ok(LoadedTables { input, master })
}

pub fn filter(request: &ValidationRequest, tables: &LoadedTables) -> Result<FilterOutcome> {
    run_pipeline(&tables.input, &tables.master, &request.filter).context("filter rows")
}

/// Writes the outcome frame and returns the written path, or `None` on a dry run.
pub fn output(request: &ValidationRequest, outcome: &FilterOutcome) -> Result<Option<PathBuf>> {
    if request.dry_run {
        info!(path = %request.output.display(), "dry run, output not written");
        return Ok(None);
    }
    write_xlsx(&request.output, &outcome.frame, &request.xlsx)
        .with_context(|| format!("write {}", request.output.display()))?;
    Ok(Some(request.output.clone()))
}

/// Builds the run result from a finished outcome.
pub fn summarize(
    request: &ValidationRequest,
    outcome: FilterOutcome,
    written: Option<PathBuf>,
) -> ValidationResult {
    ValidationResult {
        input: request.input.clone(),
        master: request.master.clone(),
        output: written,
        output_rows: outcome.output_rows(),
        reference_column: outcome.reference_column,
        reference_count: outcome.reference_count,
        stages: outcome.stages,
    }
}

/// Runs every stage without printing progress.
pub fn run_validation(request: &ValidationRequest) -> Result<ValidationResult> {
    check_sources(request)?;
    let tables = load(request)?;
    let outcome = filter(request, &tables)?;
    let written = output(request, &outcome)?;
    Ok(summarize(request, outcome, written))
}
