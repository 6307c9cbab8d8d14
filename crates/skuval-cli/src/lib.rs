//! CLI library components for the product workbook validator.

pub mod logging;
pub mod pipeline;
pub mod types;
