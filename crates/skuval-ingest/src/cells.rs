//! Cell normalization from workbook values to typed DataFrame columns.

use std::collections::{BTreeMap, BTreeSet};

use calamine::{Data, DataType as _};
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

use crate::polars_utils::{format_bool, format_numeric};

/// Text markers read as missing values, matching what spreadsheet-oriented
/// data tools treat as NA by default.
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A workbook cell after NA handling, before it is placed in a column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Converts a raw workbook cell, mapping blanks and NA markers to Null.
    pub fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Null,
            Data::Int(v) => Self::Int(*v),
            Data::Float(v) => number_value(*v),
            Data::Bool(v) => Self::Bool(*v),
            Data::String(s) => text_value(s.clone()),
            Data::DateTime(dt) => match cell.as_datetime() {
                Some(value) => Self::Text(value.format(DATETIME_FORMAT).to_string()),
                None => number_value(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => text_value(s.clone()),
            Data::Error(error) => text_value(error.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text rendering used for string columns and headers.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) => Some(format_numeric(*v)),
            Self::Bool(v) => Some(format_bool(*v).to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

fn number_value(v: f64) -> CellValue {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        CellValue::Int(v as i64)
    } else {
        CellValue::Float(v)
    }
}

fn text_value(s: String) -> CellValue {
    if is_na_marker(&s) {
        CellValue::Null
    } else {
        CellValue::Text(s)
    }
}

/// Returns true when the text is one of the recognized NA markers.
pub fn is_na_marker(value: &str) -> bool {
    NA_MARKERS.contains(&value)
}

/// Column storage type inferred from the non-null cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

/// Picks the narrowest column type that holds every non-null cell.
///
/// Mixed or all-null columns fall back to text.
pub fn infer_kind(cells: &[CellValue]) -> ColumnKind {
    let mut seen = false;
    let mut all_int = true;
    let mut all_numeric = true;
    let mut all_bool = true;
    for cell in cells {
        match cell {
            CellValue::Null => continue,
            CellValue::Int(_) => all_bool = false,
            CellValue::Float(_) => {
                all_int = false;
                all_bool = false;
            }
            CellValue::Bool(_) => {
                all_int = false;
                all_numeric = false;
            }
            CellValue::Text(_) => return ColumnKind::Text,
        }
        seen = true;
    }
    match (seen, all_int, all_numeric, all_bool) {
        (false, ..) => ColumnKind::Text,
        (true, true, _, _) => ColumnKind::Int,
        (true, _, true, _) => ColumnKind::Float,
        (true, _, _, true) => ColumnKind::Bool,
        _ => ColumnKind::Text,
    }
}

/// Builds a named column from normalized cells.
pub fn build_column(name: &str, cells: &[CellValue]) -> Column {
    let series = match infer_kind(cells) {
        ColumnKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Int(v) => Some(*v as f64),
                    CellValue::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Bool(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(CellValue::render).collect();
            Series::new(name.into(), values)
        }
    };
    series.into_column()
}

/// Produces unique, non-empty column names from a raw header row.
///
/// Blank headers become `Unnamed: {index}`; repeated names get `.1`, `.2`
/// suffixes in order of appearance.
pub fn normalize_headers(raw: &[Option<String>]) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let base = match value {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => format!("Unnamed: {idx}"),
        };
        let mut name = base.clone();
        while used.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{base}.{count}");
        }
        used.insert(name.clone());
        headers.push(name);
    }
    headers
}
