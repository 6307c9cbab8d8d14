//! The four pipeline stages.
//!
//! Each filter stage builds a keep-mask row by row and applies it with
//! `DataFrame::filter`, which preserves the relative order of kept rows.

use std::fmt;

use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};
use tracing::trace;

use crate::cells::{column_cells, is_missing, is_missing_or_zero, trimmed_text};
use crate::error::{FilterError, Result};
use crate::layout::ColumnLayout;
use crate::reference::ReferenceSet;

/// Pipeline stage identifiers, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Projection,
    Completeness,
    Quantity,
    Reference,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Projection,
        Stage::Completeness,
        Stage::Quantity,
        Stage::Reference,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Projection => "Column projection",
            Stage::Completeness => "Completeness",
            Stage::Quantity => "Zero/empty quantity",
            Stage::Reference => "Reference membership",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rows entering and leaving one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCount {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
}

impl StageCount {
    pub fn dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Stage 1: select the layout's source columns under their field names.
///
/// Fails when the input is narrower than the layout requires.
pub fn project_columns(df: &DataFrame, layout: &ColumnLayout) -> Result<DataFrame> {
    let required = layout.required_width();
    if df.width() < required {
        return Err(FilterError::InputTooNarrow {
            required,
            actual: df.width(),
        });
    }
    let source = df.get_columns();
    let columns: Vec<Column> = layout
        .fields()
        .iter()
        .map(|field| {
            let mut column = source[field.position].clone();
            column.rename(field.name.as_str().into());
            column
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Stage 2: drop rows where every completeness field is missing.
pub fn filter_complete(df: &DataFrame, fields: &[String]) -> Result<DataFrame> {
    let columns = fields
        .iter()
        .map(|name| column_cells(df, name))
        .collect::<Result<Vec<_>>>()?;
    let keep: Vec<bool> = (0..df.height())
        .map(|idx| {
            let complete = columns.iter().any(|cells| !is_missing(&cells[idx]));
            if !complete {
                trace!(row = idx, "row dropped: all completeness fields missing");
            }
            complete
        })
        .collect();
    apply_mask(df, &keep, "complete")
}

/// Stage 3: drop rows whose quantity is missing or reads as `"0"`.
pub fn filter_quantity(df: &DataFrame, field: &str) -> Result<DataFrame> {
    let cells = column_cells(df, field)?;
    let keep: Vec<bool> = cells
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let drop = is_missing_or_zero(value);
            if drop {
                trace!(row = idx, field, "row dropped: quantity missing or zero");
            }
            !drop
        })
        .collect();
    apply_mask(df, &keep, "quantity")
}

/// Stage 4: keep rows whose trimmed article identifier is a reference value.
pub fn filter_reference(
    df: &DataFrame,
    field: &str,
    reference: &ReferenceSet,
) -> Result<DataFrame> {
    let cells = column_cells(df, field)?;
    let keep: Vec<bool> = cells
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let article = trimmed_text(value);
            let known = article
                .as_deref()
                .is_some_and(|article| reference.contains(article));
            if !known {
                trace!(
                    row = idx,
                    article = article.as_deref().unwrap_or(""),
                    "row dropped: article not in master data"
                );
            }
            known
        })
        .collect();
    apply_mask(df, &keep, "reference")
}

fn apply_mask(df: &DataFrame, keep: &[bool], name: &str) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice(name.into(), keep);
    Ok(df.filter(&mask)?)
}
