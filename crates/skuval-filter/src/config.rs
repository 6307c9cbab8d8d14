//! Filter configuration: layout plus the role each field plays.

use std::collections::BTreeSet;

use crate::error::{FilterError, Result};
use crate::layout::{ColumnLayout, ColumnOverride, MAX_COLUMN_INDEX};

/// Master column holding reference identifiers ("Article").
pub const DEFAULT_REFERENCE_COLUMN: &str = "Артикул";

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Source positions of the projected fields.
    pub layout: ColumnLayout,
    /// A row is dropped when every one of these fields is missing.
    pub completeness_fields: Vec<String>,
    /// Field whose missing or `"0"` value drops the row.
    pub quantity_field: String,
    /// Field matched against the master reference identifiers.
    pub article_field: String,
    /// Preferred master identifier column; the first column is used when absent.
    pub reference_column: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            completeness_fields: ["D", "N", "O", "Q"].map(String::from).to_vec(),
            quantity_field: "S".to_string(),
            article_field: "Q".to_string(),
            reference_column: DEFAULT_REFERENCE_COLUMN.to_string(),
        }
    }
}

impl FilterConfig {
    /// Apply `NAME=POSITION` overrides to the layout.
    pub fn with_overrides(mut self, overrides: &[ColumnOverride]) -> Result<Self> {
        for column in overrides {
            self.layout.apply_override(column)?;
        }
        Ok(self)
    }

    /// Set the preferred master identifier column.
    #[must_use]
    pub fn with_reference_column(mut self, name: impl Into<String>) -> Self {
        self.reference_column = name.into();
        self
    }

    /// Checks that every role names a field of the layout.
    pub fn validate(&self) -> Result<()> {
        if self.layout.fields().is_empty() {
            return Err(FilterError::InvalidLayout {
                message: "layout defines no fields".to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for field in self.layout.fields() {
            if field.name.trim().is_empty() {
                return Err(FilterError::InvalidLayout {
                    message: format!("field at position {} has an empty name", field.position),
                });
            }
            if field.position > MAX_COLUMN_INDEX {
                return Err(FilterError::InvalidLayout {
                    message: format!(
                        "field '{}' points past the last sheet column ({})",
                        field.name, field.position
                    ),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FilterError::InvalidLayout {
                    message: format!("field '{}' is defined more than once", field.name),
                });
            }
        }
        if self.completeness_fields.is_empty() {
            return Err(FilterError::InvalidLayout {
                message: "no completeness fields configured".to_string(),
            });
        }
        let roles = self
            .completeness_fields
            .iter()
            .chain([&self.quantity_field, &self.article_field]);
        for field in roles {
            if !self.layout.contains(field) {
                return Err(FilterError::UnknownField {
                    field: field.clone(),
                    known: self.layout.names().join(", "),
                });
            }
        }
        if self.reference_column.trim().is_empty() {
            return Err(FilterError::InvalidLayout {
                message: "reference column name is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldSpec;

    #[test]
    fn default_config_is_valid() {
        let config = FilterConfig::default();
        config.validate().unwrap();
        assert_eq!(config.reference_column, "Артикул");
        assert_eq!(config.completeness_fields, vec!["D", "N", "O", "Q"]);
    }

    #[test]
    fn overrides_apply_to_layout() {
        let config = FilterConfig::default()
            .with_overrides(&["Q=R".parse().unwrap()])
            .unwrap();
        assert_eq!(config.layout.position("Q"), Some(17));
    }

    #[test]
    fn validate_rejects_role_outside_layout() {
        let config = FilterConfig {
            quantity_field: "T".to_string(),
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::UnknownField { field, .. }) if field == "T"
        ));
    }

    #[test]
    fn validate_rejects_duplicate_fields() {
        let config = FilterConfig {
            layout: ColumnLayout::new(vec![
                FieldSpec::new("D", 3),
                FieldSpec::new("N", 13),
                FieldSpec::new("O", 14),
                FieldSpec::new("Q", 16),
                FieldSpec::new("S", 18),
                FieldSpec::new("Q", 17),
            ]),
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn validate_rejects_position_past_sheet_edge() {
        let config = FilterConfig {
            layout: ColumnLayout::new(vec![
                FieldSpec::new("D", 3),
                FieldSpec::new("N", 13),
                FieldSpec::new("O", 14),
                FieldSpec::new("Q", 16),
                FieldSpec::new("S", usize::MAX),
            ]),
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_layout() {
        let config = FilterConfig {
            layout: ColumnLayout::new(Vec::new()),
            ..FilterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidLayout { .. })
        ));
    }
}
