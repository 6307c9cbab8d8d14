//! Worksheet and workbook XML generation.

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::parts::{HEADER_STYLE, RELATIONSHIPS_NS, SPREADSHEET_NS};

/// Converts a zero-based column index to sheet column letters (0 -> A, 26 -> AA).
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        let digit = (remaining - 1) % 26;
        letters.push(b'A' + digit as u8);
        remaining = (remaining - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1-style reference for a zero-based row and column.
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

enum CellContent {
    Number(String),
    Boolean(bool),
    Text(String),
}

fn cell_content(value: AnyValue<'_>) -> Option<CellContent> {
    let content = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => CellContent::Number(v.to_string()),
        AnyValue::Int16(v) => CellContent::Number(v.to_string()),
        AnyValue::Int32(v) => CellContent::Number(v.to_string()),
        AnyValue::Int64(v) => CellContent::Number(v.to_string()),
        AnyValue::UInt8(v) => CellContent::Number(v.to_string()),
        AnyValue::UInt16(v) => CellContent::Number(v.to_string()),
        AnyValue::UInt32(v) => CellContent::Number(v.to_string()),
        AnyValue::UInt64(v) => CellContent::Number(v.to_string()),
        AnyValue::Float32(v) if v.is_finite() => CellContent::Number(v.to_string()),
        AnyValue::Float64(v) if v.is_finite() => CellContent::Number(v.to_string()),
        AnyValue::Float32(_) | AnyValue::Float64(_) => return None,
        AnyValue::Boolean(v) => CellContent::Boolean(v),
        AnyValue::String(s) => CellContent::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellContent::Text(s.to_string()),
        other => CellContent::Text(other.to_string()),
    };
    Some(content)
}

/// Drops characters that XML 1.0 cannot carry.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\t' | '\n' | '\r'))
        .collect()
}

fn write_cell<W: std::io::Write>(
    xml: &mut Writer<W>,
    reference: &str,
    content: &CellContent,
    style: Option<&str>,
) -> Result<()> {
    let mut cell = BytesStart::new("c");
    cell.push_attribute(("r", reference));
    if let Some(style) = style {
        cell.push_attribute(("s", style));
    }
    match content {
        CellContent::Number(number) => {
            xml.write_event(Event::Start(cell))?;
            xml.write_event(Event::Start(BytesStart::new("v")))?;
            xml.write_event(Event::Text(BytesText::new(number)))?;
            xml.write_event(Event::End(BytesEnd::new("v")))?;
        }
        CellContent::Boolean(value) => {
            cell.push_attribute(("t", "b"));
            xml.write_event(Event::Start(cell))?;
            xml.write_event(Event::Start(BytesStart::new("v")))?;
            xml.write_event(Event::Text(BytesText::new(if *value { "1" } else { "0" })))?;
            xml.write_event(Event::End(BytesEnd::new("v")))?;
        }
        CellContent::Text(text) => {
            cell.push_attribute(("t", "inlineStr"));
            xml.write_event(Event::Start(cell))?;
            xml.write_event(Event::Start(BytesStart::new("is")))?;
            let safe = xml_safe(text);
            let mut t = BytesStart::new("t");
            if safe.trim() != safe {
                t.push_attribute(("xml:space", "preserve"));
            }
            xml.write_event(Event::Start(t))?;
            xml.write_event(Event::Text(BytesText::new(&safe)))?;
            xml.write_event(Event::End(BytesEnd::new("t")))?;
            xml.write_event(Event::End(BytesEnd::new("is")))?;
        }
    }
    xml.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

/// Builds `sheet1.xml`: a bold header row followed by one row per frame row.
///
/// Null cells are omitted; numeric columns become number cells.
pub fn worksheet_xml(df: &DataFrame) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("worksheet");
    root.push_attribute(("xmlns", SPREADSHEET_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("sheetData")))?;

    let mut header = BytesStart::new("row");
    header.push_attribute(("r", "1"));
    xml.write_event(Event::Start(header))?;
    for (col, name) in df.get_column_names().iter().enumerate() {
        let content = CellContent::Text(name.to_string());
        write_cell(&mut xml, &cell_reference(0, col), &content, Some(HEADER_STYLE))?;
    }
    xml.write_event(Event::End(BytesEnd::new("row")))?;

    let columns = df.get_columns();
    for row_idx in 0..df.height() {
        let row_number = (row_idx + 2).to_string();
        let mut row = BytesStart::new("row");
        row.push_attribute(("r", row_number.as_str()));
        xml.write_event(Event::Start(row))?;
        for (col, column) in columns.iter().enumerate() {
            let value = column
                .get(row_idx)
                .with_context(|| format!("read row {row_idx} of column {}", column.name()))?;
            if let Some(content) = cell_content(value) {
                write_cell(&mut xml, &cell_reference(row_idx + 1, col), &content, None)?;
            }
        }
        xml.write_event(Event::End(BytesEnd::new("row")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("sheetData")))?;
    xml.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(xml.into_inner())
}

/// Builds `workbook.xml` declaring the single sheet.
pub fn workbook_xml(sheet_name: &str) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("workbook");
    root.push_attribute(("xmlns", SPREADSHEET_NS));
    root.push_attribute(("xmlns:r", RELATIONSHIPS_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("sheets")))?;
    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", sheet_name));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    xml.write_event(Event::Empty(sheet))?;
    xml.write_event(Event::End(BytesEnd::new("sheets")))?;
    xml.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(xml.into_inner())
}
