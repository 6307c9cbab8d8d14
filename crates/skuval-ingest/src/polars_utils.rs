//! Polars AnyValue utility functions.
//!
//! Cell values are compared as text throughout the pipeline, so every stage
//! goes through the same rendering: integers without a decimal point, floats
//! without trailing zeros, booleans as `True`/`False`.

use polars::prelude::*;

/// Converts a Polars AnyValue to text, returning None for Null.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => format_bool(b).to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// Integral values print without a decimal point so that a numeric `0` cell
/// and a text `"0"` cell render identically.
pub fn format_numeric(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Renders a boolean cell the way spreadsheet tools display it.
pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Reads one cell of a named column as text, None when null or out of range.
pub fn column_value_text(df: &DataFrame, name: &str, idx: usize) -> Option<String> {
    let column = df.column(name).ok()?;
    any_to_text(column.get(idx).unwrap_or(AnyValue::Null))
}
