//! Cell predicates shared by every filter stage.

use polars::prelude::{AnyValue, DataFrame};
use skuval_ingest::any_to_text;

use crate::error::{FilterError, Result};

/// Quantity value that excludes a row.
pub const ZERO_QUANTITY: &str = "0";

/// A cell is missing when it is null (or a float NaN).
///
/// Whitespace-only text is present: blanks were already turned into nulls
/// when the workbook was loaded.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Trimmed text of a present cell; None when the cell is missing.
pub fn trimmed_text(value: AnyValue<'_>) -> Option<String> {
    if is_missing(&value) {
        return None;
    }
    any_to_text(value).map(|text| text.trim().to_string())
}

/// True when the quantity cell is missing or reads as `"0"` after trimming.
pub fn is_missing_or_zero(value: AnyValue<'_>) -> bool {
    match trimmed_text(value) {
        Some(text) => text == ZERO_QUANTITY,
        None => true,
    }
}

/// Collects the cells of a named column in row order.
pub(crate) fn column_cells<'a>(df: &'a DataFrame, name: &str) -> Result<Vec<AnyValue<'a>>> {
    let column = df.column(name).map_err(|_| FilterError::ColumnNotFound {
        column: name.to_string(),
    })?;
    (0..df.height())
        .map(|idx| column.get(idx).map_err(FilterError::from))
        .collect()
}
