//! Row filter pipeline with explicit stages.
//!
//! The pipeline runs these stages in order:
//! 1. **Projection**: select the layout's source columns under their field names
//! 2. **Completeness**: drop rows where every completeness field is missing
//! 3. **Quantity**: drop rows whose quantity is missing or `"0"`
//! 4. **Reference**: keep rows whose article is listed in the master data
//!
//! The reference set is built from the master table before any row is
//! touched, so an unusable master fails the run up front.

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::config::FilterConfig;
use crate::error::Result;
use crate::reference::ReferenceSet;
use crate::stages::{
    Stage, StageCount, filter_complete, filter_quantity, filter_reference, project_columns,
};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Surviving rows, projected to the layout's fields.
    pub frame: DataFrame,
    /// Master column the reference identifiers were read from.
    pub reference_column: String,
    /// Number of distinct reference identifiers.
    pub reference_count: usize,
    /// Row counts per stage, in execution order.
    pub stages: Vec<StageCount>,
}

impl FilterOutcome {
    pub fn input_rows(&self) -> usize {
        self.stages.first().map_or(0, |count| count.rows_in)
    }

    pub fn output_rows(&self) -> usize {
        self.frame.height()
    }
}

/// Runs all four stages on the input and master tables.
pub fn run_pipeline(
    input: &DataFrame,
    master: &DataFrame,
    config: &FilterConfig,
) -> Result<FilterOutcome> {
    let span = info_span!("filter", layout = %config.layout);
    let _guard = span.enter();
    config.validate()?;

    let reference = ReferenceSet::from_master(master, &config.reference_column)?;
    info!(
        column = %reference.column(),
        identifiers = reference.len(),
        "reference set built"
    );
    if reference.is_empty() {
        warn!(
            column = %reference.column(),
            "reference column holds no identifiers, no row can match"
        );
    }

    let mut stages = Vec::with_capacity(Stage::ALL.len());

    let projected = project_columns(input, &config.layout)?;
    stages.push(record(Stage::Projection, input.height(), &projected));

    let complete = filter_complete(&projected, &config.completeness_fields)?;
    stages.push(record(Stage::Completeness, projected.height(), &complete));

    let counted = filter_quantity(&complete, &config.quantity_field)?;
    stages.push(record(Stage::Quantity, complete.height(), &counted));

    let frame = filter_reference(&counted, &config.article_field, &reference)?;
    stages.push(record(Stage::Reference, counted.height(), &frame));

    if frame.height() == 0 {
        warn!(input_rows = input.height(), "no rows passed all filters");
    }

    Ok(FilterOutcome {
        frame,
        reference_column: reference.column().to_string(),
        reference_count: reference.len(),
        stages,
    })
}

fn record(stage: Stage, rows_in: usize, output: &DataFrame) -> StageCount {
    let count = StageCount {
        stage,
        rows_in,
        rows_out: output.height(),
    };
    if count.dropped() > 0 {
        info!(
            stage = %stage,
            rows_in,
            rows_out = count.rows_out,
            dropped = count.dropped(),
            "stage complete"
        );
    } else {
        debug!(stage = %stage, rows = rows_in, "stage complete, no rows dropped");
    }
    count
}
