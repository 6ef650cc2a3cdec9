//! Column value extraction
//!
//! Gathers one column's cells into the observed/missing split consumed by the
//! classifier and the statistics engine. Numeric cells keep their decoded
//! value alongside a lossless text rendering.

use std::collections::HashSet;

use crate::models::{Cell, Table};

/// One non-missing value of a column
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedValue {
    /// Trimmed text form; numbers use the shortest round-trip rendering
    pub text: String,
    /// Decoded value for numeric cells
    pub number: Option<f64>,
}

impl ObservedValue {
    /// The value as a finite number, parsing text when no decoded value exists
    pub fn as_number(&self) -> Option<f64> {
        match self.number {
            Some(v) => Some(v),
            None => parse_number(&self.text),
        }
    }
}

/// Parse text as a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Values of a single column split into observed values and a missing count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues {
    pub total: usize,
    pub missing: usize,
    pub observed: Vec<ObservedValue>,
}

impl ColumnValues {
    /// Collect values from decoded cells
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut values = Self::default();
        for cell in cells {
            values.total += 1;
            match cell {
                Cell::Number(v) if v.is_finite() => values.observed.push(ObservedValue {
                    text: v.to_string(),
                    number: Some(*v),
                }),
                Cell::Text(s) if !s.trim().is_empty() => values.observed.push(ObservedValue {
                    text: s.trim().to_string(),
                    number: None,
                }),
                _ => values.missing += 1,
            }
        }
        values
    }

    /// Collect values from raw text; blank strings count as missing
    pub fn from_strings<S: AsRef<str>>(raw: &[S]) -> Self {
        let mut values = Self::default();
        for s in raw {
            values.total += 1;
            let trimmed = s.as_ref().trim();
            if trimmed.is_empty() {
                values.missing += 1;
            } else {
                values.observed.push(ObservedValue {
                    text: trimmed.to_string(),
                    number: None,
                });
            }
        }
        values
    }

    /// Collect one column of a decoded table
    pub fn from_table(table: &Table, column: usize) -> Self {
        Self::from_cells(table.column(column))
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Number of distinct observed text values
    pub fn unique_count(&self) -> usize {
        self.observed
            .iter()
            .map(|v| v.text.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.observed.iter().map(|v| v.text.as_str())
    }
}
