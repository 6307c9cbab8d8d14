//! Shared fixtures for pipeline tests.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

pub const INPUT_WIDTH: usize = 19;

/// One input row described by its D, N, O, Q, S cells; all other columns are filler.
#[derive(Debug, Clone, Default)]
pub struct ProductRow {
    pub d: Option<String>,
    pub n: Option<String>,
    pub o: Option<String>,
    pub q: Option<String>,
    pub s: Option<String>,
}

impl ProductRow {
    pub fn new(
        d: Option<&str>,
        n: Option<&str>,
        o: Option<&str>,
        q: Option<&str>,
        s: Option<&str>,
    ) -> Self {
        Self {
            d: d.map(String::from),
            n: n.map(String::from),
            o: o.map(String::from),
            q: q.map(String::from),
            s: s.map(String::from),
        }
    }

    fn cell(&self, position: usize, row_idx: usize) -> Option<String> {
        match position {
            3 => self.d.clone(),
            13 => self.n.clone(),
            14 => self.o.clone(),
            16 => self.q.clone(),
            18 => self.s.clone(),
            other => Some(format!("filler-{other}-{row_idx}")),
        }
    }
}

/// Builds a 19-column input table with the given rows.
pub fn input_frame(rows: &[ProductRow]) -> DataFrame {
    let columns: Vec<Column> = (0..INPUT_WIDTH)
        .map(|position| {
            let values: Vec<Option<String>> = rows
                .iter()
                .enumerate()
                .map(|(row_idx, row)| row.cell(position, row_idx))
                .collect();
            Series::new(format!("col{position}").into(), values).into_column()
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

/// Builds a master table from (column name, values) pairs.
pub fn master_frame(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

/// Reads a frame back as rows of optional text, in column order.
pub fn frame_rows(df: &DataFrame) -> Vec<Vec<Option<String>>> {
    (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| skuval_ingest::any_to_text(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect()
}

/// Projects a fixture row to the expected output shape.
pub fn expected_row(row: &ProductRow) -> Vec<Option<String>> {
    vec![
        row.d.clone(),
        row.n.clone(),
        row.o.clone(),
        row.q.clone(),
        row.s.clone(),
    ]
}
