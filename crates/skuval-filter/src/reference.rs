//! Reference identifiers derived from the master table.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::cells::{column_cells, trimmed_text};
use crate::error::{FilterError, Result};

/// Distinct, trimmed identifier values of the master table.
///
/// Built once per run; lookups never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet {
    column: String,
    values: BTreeSet<String>,
}

impl ReferenceSet {
    /// Builds the set from the master table.
    ///
    /// Uses `preferred_column` when the master has a column of exactly that
    /// name, otherwise the first column. Null and blank identifiers are
    /// skipped.
    pub fn from_master(master: &DataFrame, preferred_column: &str) -> Result<Self> {
        let first = master
            .get_column_names()
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| FilterError::EmptyMaster {
                reason: "no columns".to_string(),
            })?;
        if master.height() == 0 {
            return Err(FilterError::EmptyMaster {
                reason: "no data rows".to_string(),
            });
        }
        let column = if master.column(preferred_column).is_ok() {
            preferred_column.to_string()
        } else {
            debug!(
                preferred = %preferred_column,
                fallback = %first,
                "reference column not found, using first master column"
            );
            first
        };

        let values: BTreeSet<String> = column_cells(master, &column)?
            .into_iter()
            .filter_map(trimmed_text)
            .filter(|value| !value.is_empty())
            .collect();
        Ok(Self { column, values })
    }

    /// Builds a set directly from identifier values.
    pub fn from_values<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values
            .into_iter()
            .map(|value| value.as_ref().trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        Self {
            column: column.into(),
            values,
        }
    }

    /// Master column the identifiers were read from.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Exact membership test on an already trimmed identifier.
    pub fn contains(&self, identifier: &str) -> bool {
        self.values.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
