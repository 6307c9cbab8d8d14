use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span};

use skuval_cli::pipeline::{ValidationRequest, check_sources, filter, load, output, summarize};
use skuval_cli::types::ValidationResult;
use skuval_filter::FilterConfig;
use skuval_output::XlsxOptions;

use crate::cli::Cli;

/// Builds the run request from parsed flags and the two source paths.
pub fn request_from_cli(
    cli: &Cli,
    input: PathBuf,
    master: PathBuf,
) -> Result<ValidationRequest> {
    let filter = FilterConfig::default()
        .with_overrides(&cli.columns)?
        .with_reference_column(cli.reference_column.clone());
    let xlsx = XlsxOptions::default().with_sheet_name(cli.sheet_name.clone());
    xlsx.validate()?;
    Ok(ValidationRequest {
        output: cli.output.clone(),
        filter,
        xlsx,
        dry_run: cli.dry_run,
        ..ValidationRequest::new(input, master)
    })
}

pub fn run_validate(request: &ValidationRequest) -> Result<ValidationResult> {
    let span = info_span!(
        "validate",
        input = %request.input.display(),
        master = %request.master.display()
    );
    let _guard = span.enter();
    let started = Instant::now();

    check_sources(request)?;
    println!("Loading data...");
    let tables = load(request)?;
    let outcome = filter(request, &tables)?;
    let written = output(request, &outcome)?;

    info!(
        input_rows = tables.input.height(),
        output_rows = outcome.output_rows(),
        elapsed = ?started.elapsed(),
        "validation finished"
    );
    Ok(summarize(request, outcome, written))
}
