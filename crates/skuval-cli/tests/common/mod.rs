//! Workbook fixtures shared by the CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use skuval_output::{XlsxOptions, write_xlsx};

const WIDTH: usize = 19;

/// Sheet row keyed by column letter; every other column holds filler text.
pub struct Row {
    d: Option<&'static str>,
    q: Option<&'static str>,
    s: Option<&'static str>,
}

pub fn row(d: Option<&'static str>, q: Option<&'static str>, s: Option<&'static str>) -> Row {
    Row { d, q, s }
}

pub fn write_input(dir: &Path, rows: &[Row]) -> PathBuf {
    let columns: Vec<Column> = (0..WIDTH)
        .map(|idx| {
            let values: Vec<Option<String>> = rows
                .iter()
                .enumerate()
                .map(|(row_idx, row)| match idx {
                    3 => row.d.map(String::from),
                    13 | 14 => None,
                    16 => row.q.map(String::from),
                    18 => row.s.map(String::from),
                    _ => Some(format!("filler-{row_idx}-{idx}")),
                })
                .collect();
            Series::new(format!("col{idx}").into(), values).into_column()
        })
        .collect();
    let path = dir.join("input.xlsx");
    write_xlsx(&path, &DataFrame::new(columns).unwrap(), &XlsxOptions::default()).unwrap();
    path
}

pub fn write_master(dir: &Path, columns: Vec<(&str, Vec<&str>)>) -> PathBuf {
    let columns: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    let path = dir.join("master.xlsx");
    write_xlsx(&path, &DataFrame::new(columns).unwrap(), &XlsxOptions::default()).unwrap();
    path
}
