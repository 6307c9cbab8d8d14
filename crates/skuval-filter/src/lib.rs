//! Row filter pipeline for product records.
//!
//! This crate turns a loaded product table and a master reference table into
//! the cleaned output table:
//!
//! - **layout**: field name to source column mapping, applied once
//! - **config**: field roles and the master identifier column
//! - **stages**: projection, completeness, quantity and reference filters
//! - **reference**: the master identifier set
//! - **pipeline**: runs the stages in order and records row counts

mod cells;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod reference;
pub mod stages;

pub use cells::{ZERO_QUANTITY, is_missing, is_missing_or_zero, trimmed_text};
pub use config::{DEFAULT_REFERENCE_COLUMN, FilterConfig};
pub use error::{FilterError, Result};
pub use layout::{
    ColumnLayout, ColumnOverride, FieldSpec, MAX_COLUMN_INDEX, column_letter_to_index,
};
pub use pipeline::{FilterOutcome, run_pipeline};
pub use reference::ReferenceSet;
pub use stages::{
    Stage, StageCount, filter_complete, filter_quantity, filter_reference, project_columns,
};
