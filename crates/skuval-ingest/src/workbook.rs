//! First-sheet workbook reading.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};

use crate::cells::{CellValue, build_column, normalize_headers};
use crate::error::{IngestError, Result};

/// Verifies that a source path exists and is a regular file.
pub fn check_source_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads the first worksheet of a workbook into a DataFrame.
///
/// The first sheet row is the header. Column positions are absolute sheet
/// columns: when the used range starts right of column A, the leading
/// columns are kept as all-null `Unnamed: {index}` columns so that index 3
/// is always column D.
pub fn read_workbook(path: &Path) -> Result<DataFrame> {
    check_source_file(path)?;
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| workbook_error(e.to_string()))?;

    let df = frame_from_range(&range).ok_or_else(|| IngestError::EmptySheet {
        path: path.to_path_buf(),
        sheet: sheet.clone(),
    })??;

    info!(
        path = %path.display(),
        sheet = %sheet,
        rows = df.height(),
        columns = df.width(),
        "workbook loaded"
    );
    Ok(df)
}

/// Converts a worksheet range into a DataFrame.
///
/// Returns None when the range has no cells at all.
pub fn frame_from_range(range: &Range<Data>) -> Option<Result<DataFrame>> {
    let (_, start_col) = range.start()?;
    let offset = start_col as usize;
    let width = offset + range.width();
    let mut rows = range.rows();
    let header_row = rows.next()?;

    let mut raw_headers: Vec<Option<String>> = vec![None; width];
    for (idx, cell) in header_row.iter().enumerate() {
        raw_headers[offset + idx] = CellValue::from_data(cell).render();
    }
    let headers = normalize_headers(&raw_headers);

    let height = range.height().saturating_sub(1);
    let mut cells: Vec<Vec<CellValue>> = vec![Vec::with_capacity(height); width];
    for row in rows {
        for (col, column_cells) in cells.iter_mut().enumerate() {
            let value = col
                .checked_sub(offset)
                .and_then(|idx| row.get(idx))
                .map(CellValue::from_data)
                .unwrap_or(CellValue::Null);
            column_cells.push(value);
        }
    }
    debug!(
        offset,
        width,
        rows = height,
        "building frame from worksheet range"
    );

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells.iter())
        .map(|(name, column_cells)| build_column(name, column_cells))
        .collect();
    Some(DataFrame::new(columns).map_err(IngestError::from))
}
