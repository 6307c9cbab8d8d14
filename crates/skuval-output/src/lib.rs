//! Workbook output for filtered product frames.

pub mod parts;
pub mod sheet;
pub mod xlsx;

pub use sheet::{cell_reference, column_letters, workbook_xml, worksheet_xml};
pub use xlsx::{DEFAULT_SHEET_NAME, XlsxOptions, ensure_parent_dir, write_xlsx};
