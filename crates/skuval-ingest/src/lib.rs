//! Workbook ingestion for product validation.
//!
//! This crate loads the first worksheet of a spreadsheet file into a Polars
//! DataFrame with a normalized header row and per-column type inference.
//!
//! # Features
//!
//! - **Workbook Loading**: `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` via calamine
//! - **Absolute Positions**: column index N is always sheet column N
//! - **NA Handling**: blank cells and common NA markers load as null
//! - **Text Rendering**: one shared cell-to-text conversion for comparisons
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use skuval_ingest::read_workbook;
//!
//! let products = read_workbook(Path::new("products.xlsx"))?;
//! let master = read_workbook(Path::new("master_data.xlsx"))?;
//! ```

mod cells;
mod error;
mod polars_utils;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Workbook Reading ===
pub use workbook::{check_source_file, frame_from_range, read_workbook};

// === Cell Handling ===
pub use cells::{CellValue, ColumnKind, NA_MARKERS, is_na_marker, normalize_headers};

// === Text Conversion ===
pub use polars_utils::{any_to_text, column_value_text, format_bool, format_numeric};
