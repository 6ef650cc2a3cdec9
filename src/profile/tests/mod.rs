//! Test utilities for classification and statistics tests

use crate::models::{Cell, Schema, Table, VariableDescriptor, VariableKind};


/// Build a descriptor with default label and format
pub fn column(name: &str, kind: VariableKind, length: usize) -> VariableDescriptor {
    VariableDescriptor {
        name: name.to_string(),
        label: name.to_string(),
        kind,
        length,
        ordinal: 0,
        format: Default::default(),
    }
}

/// Build a table from descriptors and rows
pub fn table(columns: Vec<VariableDescriptor>, rows: Vec<Vec<Cell>>) -> Table {
    Table {
        schema: Schema::new(columns),
        rows,
        dataset: Default::default(),
    }
}

/// Small mixed-type table covering every classification
pub fn mixed_table() -> Table {
    let text = |s: &str| Cell::text(s);
    let rows = vec![
        vec![text("S-001"), Cell::Number(34.0), text("F"), text("2024-01-05T08:00"), text("Mild headache")],
        vec![text("S-002"), Cell::Number(51.0), text("M"), text("2024-01-05T09:30"), text("Nausea")],
        vec![text("S-003"), Cell::Missing, text("F"), text("2024-01-07T10:15"), Cell::Missing],
        vec![text("S-004"), Cell::Number(47.5), Cell::Missing, text("2024-01-09T16:45"), text("Dizziness after dose")],
    ];
    table(
        vec![
            column("USUBJID", VariableKind::Character, 5),
            column("AGE", VariableKind::Numeric, 8),
            column("SEX", VariableKind::Character, 1),
            column("VISITDT", VariableKind::Character, 16),
            column("AETERM", VariableKind::Character, 40),
        ],
        rows,
    )
}
