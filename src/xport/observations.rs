//! Observation section decoding
//!
//! Resolves the physical row width, which may include filler bytes after the
//! logical row, and decodes each row into one cell per schema column.

use tracing::{debug, warn};

use super::fields::{decode_ascii, is_padding};
use super::numeric::decode_numeric_cell;
use crate::constants::ROW_ALIGNMENT;
use crate::error::{Result, XportError};
use crate::models::{Cell, Row, Schema, VariableKind};

/// Row layout resolved for an observation section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Sum of column storage lengths
    pub logical_width: usize,
    /// Bytes consumed per row, including filler
    pub physical_width: usize,
    /// Usable bytes after discarding trailing padding
    pub usable_len: usize,
}

impl RowLayout {
    pub fn filler(&self) -> usize {
        self.physical_width - self.logical_width
    }
}

/// Pick the physical row width for a section of `data` bytes
///
/// The logical width is tried first, then the width rounded up to the next
/// multiple of 8. A candidate is accepted when it divides the section exactly
/// or when the leftover tail bytes are all spaces or nulls.
pub fn resolve_row_layout(data: &[u8], schema: &Schema) -> Result<RowLayout> {
    let logical_width = schema.logical_width();
    if logical_width == 0 {
        return Err(XportError::unsupported("zero-width observation rows"));
    }

    let padded = logical_width.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT;
    let candidates = [logical_width, padded];

    for physical_width in candidates {
        let remainder = data.len() % physical_width;
        if remainder == 0 {
            return Ok(RowLayout {
                logical_width,
                physical_width,
                usable_len: data.len(),
            });
        }

        let usable_len = data.len() - remainder;
        if is_padding(&data[usable_len..]) {
            debug!(
                "Discarding {} padding bytes with row width {}",
                remainder, physical_width
            );
            return Ok(RowLayout {
                logical_width,
                physical_width,
                usable_len,
            });
        }
    }

    Err(XportError::unsupported(format!(
        "unable to determine observation width (logical width {}, {} bytes)",
        logical_width,
        data.len()
    )))
}

/// Decode one column's raw bytes
pub fn decode_cell(raw: &[u8], kind: VariableKind) -> Cell {
    match kind {
        VariableKind::Numeric => decode_numeric_cell(raw),
        VariableKind::Character => Cell::text(&decode_ascii(raw)),
    }
}

/// Decode all complete rows of the observation section
pub fn decode_rows(data: &[u8], schema: &Schema) -> Result<Vec<Row>> {
    let layout = resolve_row_layout(data, schema)?;
    let data = &data[..layout.usable_len];

    let mut rows = Vec::with_capacity(data.len() / layout.physical_width);
    let mut cursor = 0usize;

    while cursor < data.len() {
        match decode_row(data, cursor, schema) {
            Some((row, next)) => {
                rows.push(row);
                cursor = next + layout.filler();
            }
            None => {
                warn!(
                    "Dropping partial row at byte {} ({} bytes remain)",
                    cursor,
                    data.len() - cursor
                );
                break;
            }
        }
    }

    debug!(
        "Decoded {} rows (logical width {}, physical width {})",
        rows.len(),
        layout.logical_width,
        layout.physical_width
    );
    Ok(rows)
}

/// Decode the row starting at `cursor`; `None` when a column runs past the end
fn decode_row(data: &[u8], mut cursor: usize, schema: &Schema) -> Option<(Row, usize)> {
    let mut row = Vec::with_capacity(schema.len());
    for column in schema.iter() {
        let raw = data.get(cursor..cursor + column.length)?;
        row.push(decode_cell(raw, column.kind));
        cursor += column.length;
    }
    Some((row, cursor))
}
