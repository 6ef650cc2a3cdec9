//! Core data structures for decoded transport files.
//!
//! Defines the column schema, cell values, rows and the decoded table shared
//! read-only by classification, statistics and presentation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::xport::numeric::format_numeric;

/// Storage kind declared by a variable descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    Numeric,
    Character,
}

impl VariableKind {
    /// Map the descriptor type code to a storage kind
    pub fn from_type_code(code: i16) -> Self {
        if code == crate::constants::descriptor::NUMERIC_TYPE_CODE {
            VariableKind::Numeric
        } else {
            VariableKind::Character
        }
    }

    /// Smallest storage length allowed for this kind
    pub fn min_length(&self) -> usize {
        match self {
            VariableKind::Numeric => crate::constants::NUMERIC_CELL_LEN,
            VariableKind::Character => 1,
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Numeric => write!(f, "numeric"),
            VariableKind::Character => write!(f, "character"),
        }
    }
}

/// Display format attached to a variable; decoded but not interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    pub name: String,
    pub width: i16,
    pub decimals: i16,
}

/// One column of the decoded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub name: String,
    pub label: String,
    pub kind: VariableKind,
    /// Storage width in bytes, already clamped to the kind's minimum
    pub length: usize,
    /// Effective ordinal after substituting non-positive values
    pub ordinal: i32,
    pub format: FormatSpec,
}

/// Ordered column schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<VariableDescriptor>,
}

impl Schema {
    pub fn new(columns: Vec<VariableDescriptor>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sum of storage lengths across all columns
    pub fn logical_width(&self) -> usize {
        self.columns.iter().map(|c| c.length).sum()
    }

    /// Index of the column with the given name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.columns.iter()
    }
}

/// A decoded cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a text cell, treating blank text as missing
    pub fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Render the cell for display; `None` for missing cells
    pub fn display_text(&self, fraction_digits: usize) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Number(v) => Some(format_numeric(*v, fraction_digits)),
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s.trim().to_string()),
        }
    }
}

/// One decoded observation, one cell per schema column
pub type Row = Vec<Cell>;

/// Dataset-level metadata read from the member header, when present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: Option<String>,
    pub label: Option<String>,
}

/// Decoded transport file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Row>,
    pub dataset: DatasetInfo,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Cells of one column in row order
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}
