//! Single-sheet `.xlsx` writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::parts::{
    CONTENT_TYPES, CONTENT_TYPES_PATH, ROOT_RELS, ROOT_RELS_PATH, SHEET_PATH, STYLES,
    STYLES_PATH, WORKBOOK_PATH, WORKBOOK_RELS, WORKBOOK_RELS_PATH,
};
use crate::sheet::{workbook_xml, worksheet_xml};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Options for workbook output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XlsxOptions {
    pub sheet_name: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl XlsxOptions {
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Rejects sheet names that spreadsheet applications refuse to open.
    pub fn validate(&self) -> Result<()> {
        let name = &self.sheet_name;
        if name.trim().is_empty() {
            bail!("sheet name must not be empty");
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            bail!("sheet name '{name}' exceeds {MAX_SHEET_NAME_LEN} characters");
        }
        if let Some(ch) = name.chars().find(|ch| FORBIDDEN_SHEET_CHARS.contains(ch)) {
            bail!("sheet name '{name}' contains forbidden character '{ch}'");
        }
        Ok(())
    }
}

/// Ensure the parent directory for a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Write `df` as the only sheet of a new workbook at `path`.
///
/// The header row carries the column names in frame order; an empty frame
/// still produces a header-only sheet. An existing file is replaced.
pub fn write_xlsx(path: &Path, df: &DataFrame, options: &XlsxOptions) -> Result<()> {
    options.validate()?;
    ensure_parent_dir(path)?;

    let sheet = worksheet_xml(df)?;
    let workbook = workbook_xml(&options.sheet_name)?;

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut zip = ZipWriter::new(file);
    let file_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 6] = [
        (CONTENT_TYPES_PATH, CONTENT_TYPES.as_bytes()),
        (ROOT_RELS_PATH, ROOT_RELS.as_bytes()),
        (WORKBOOK_PATH, &workbook),
        (WORKBOOK_RELS_PATH, WORKBOOK_RELS.as_bytes()),
        (STYLES_PATH, STYLES.as_bytes()),
        (SHEET_PATH, &sheet),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, file_options)
            .with_context(|| format!("add {name} to {}", path.display()))?;
        zip.write_all(bytes)
            .with_context(|| format!("write {name} to {}", path.display()))?;
    }
    zip.finish()
        .with_context(|| format!("finish {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote workbook"
    );
    Ok(())
}
