//! Source column layout: the only place where sheet positions are known.
//!
//! Every later stage addresses the working table by field name. Changing
//! where a field lives in the source sheet means changing the layout, nothing
//! else.

use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, Result};

/// Last zero-based column index a worksheet can hold (column `XFD`).
pub const MAX_COLUMN_INDEX: usize = 16_383;

/// One logical field and the zero-based source column it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub position: usize,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Ordered mapping from output field name to source column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    fields: Vec<FieldSpec>,
}

impl Default for ColumnLayout {
    /// Sheet columns D, N, O, Q and S.
    fn default() -> Self {
        Self::new(vec![
            FieldSpec::new("D", 3),
            FieldSpec::new("N", 13),
            FieldSpec::new("O", 14),
            FieldSpec::new("Q", 16),
            FieldSpec::new("S", 18),
        ])
    }
}

impl ColumnLayout {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.position)
    }

    /// Minimum number of source columns needed to project every field.
    pub fn required_width(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.position.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Re-points an existing field to another source column.
    pub fn apply_override(&mut self, column: &ColumnOverride) -> Result<()> {
        if column.position > MAX_COLUMN_INDEX {
            return Err(FilterError::InvalidColumnSpec {
                spec: format!("{}={}", column.field, column.position),
            });
        }
        let known = self.names().join(", ");
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == column.field)
            .ok_or_else(|| FilterError::UnknownField {
                field: column.field.clone(),
                known,
            })?;
        field.position = column.position;
        Ok(())
    }
}

impl fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field.name, field.position)?;
        }
        Ok(())
    }
}

/// A `NAME=POSITION` layout override.
///
/// The position is either a zero-based index (`Q=16`) or a sheet column
/// letter (`Q=Q`, `S=AA`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverride {
    pub field: String,
    pub position: usize,
}

impl FromStr for ColumnOverride {
    type Err = FilterError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = || FilterError::InvalidColumnSpec {
            spec: spec.to_string(),
        };
        let (field, position) = spec.split_once('=').ok_or_else(invalid)?;
        let field = field.trim();
        let position = position.trim();
        if field.is_empty() || position.is_empty() {
            return Err(invalid());
        }
        let position = if position.chars().all(|ch| ch.is_ascii_digit()) {
            position.parse::<usize>().map_err(|_| invalid())?
        } else {
            column_letter_to_index(position).ok_or_else(invalid)?
        };
        if position > MAX_COLUMN_INDEX {
            return Err(invalid());
        }
        Ok(Self {
            field: field.to_string(),
            position,
        })
    }
}

/// Converts a sheet column letter (`A`, `Q`, `AA`) to a zero-based index.
pub fn column_letter_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut index = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index * 26 + digit;
    }
    Some(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_sheet_letters() {
        let layout = ColumnLayout::default();
        for field in layout.fields() {
            assert_eq!(column_letter_to_index(&field.name), Some(field.position));
        }
        assert_eq!(layout.required_width(), 19);
        assert_eq!(layout.to_string(), "D=3, N=13, O=14, Q=16, S=18");
    }

    #[test]
    fn column_letters_convert() {
        assert_eq!(column_letter_to_index("A"), Some(0));
        assert_eq!(column_letter_to_index("s"), Some(18));
        assert_eq!(column_letter_to_index("Z"), Some(25));
        assert_eq!(column_letter_to_index("AA"), Some(26));
        assert_eq!(column_letter_to_index("A1"), None);
        assert_eq!(column_letter_to_index(""), None);
    }

    #[test]
    fn override_parses_index_and_letter() {
        let by_index: ColumnOverride = "Q=17".parse().unwrap();
        assert_eq!(by_index, ColumnOverride { field: "Q".into(), position: 17 });

        let by_letter: ColumnOverride = " S = T ".parse().unwrap();
        assert_eq!(by_letter, ColumnOverride { field: "S".into(), position: 19 });
    }

    #[test]
    fn override_rejects_malformed_specs() {
        let too_far = format!("S={}", usize::MAX);
        let specs = [
            "Q",
            "=3",
            "Q=",
            "Q=-1",
            "Q=1A",
            "Q=16384",
            "Q=ZZZ",
            too_far.as_str(),
        ];
        for spec in specs {
            let result = spec.parse::<ColumnOverride>();
            assert!(
                matches!(result, Err(FilterError::InvalidColumnSpec { .. })),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn apply_override_moves_field() {
        let mut layout = ColumnLayout::default();
        layout
            .apply_override(&ColumnOverride { field: "S".into(), position: 20 })
            .unwrap();
        assert_eq!(layout.position("S"), Some(20));
        assert_eq!(layout.required_width(), 21);
    }

    #[test]
    fn override_accepts_last_sheet_column() {
        let last: ColumnOverride = "S=XFD".parse().unwrap();
        assert_eq!(last.position, MAX_COLUMN_INDEX);
    }

    #[test]
    fn apply_override_rejects_position_past_sheet_edge() {
        let mut layout = ColumnLayout::default();
        let result = layout.apply_override(&ColumnOverride {
            field: "S".into(),
            position: usize::MAX,
        });
        assert!(matches!(result, Err(FilterError::InvalidColumnSpec { .. })));
        assert_eq!(layout.position("S"), Some(18));
    }

    #[test]
    fn required_width_saturates() {
        let layout = ColumnLayout::new(vec![FieldSpec::new("S", usize::MAX)]);
        assert_eq!(layout.required_width(), usize::MAX);
    }

    #[test]
    fn apply_override_rejects_unknown_field() {
        let mut layout = ColumnLayout::default();
        let result = layout.apply_override(&ColumnOverride { field: "X".into(), position: 1 });
        assert!(matches!(result, Err(FilterError::UnknownField { .. })));
    }
}
