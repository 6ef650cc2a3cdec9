//! Variable descriptor decoding
//!
//! Decodes the fixed 140-byte descriptor records into an ordered schema.
//! Descriptors are ordered by their declared ordinal, with non-positive
//! ordinals replaced by the record's 1-based position in the file.

use tracing::{debug, warn};

use super::fields::{read_ascii_trimmed, read_i16_be};
use crate::constants::{DESCRIPTOR_LEN, descriptor};
use crate::error::{Result, XportError};
use crate::models::{FormatSpec, Schema, VariableDescriptor, VariableKind};

/// A descriptor exactly as stored, before ordering and defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDescriptor {
    pub type_code: i16,
    pub length: i16,
    pub ordinal: i16,
    pub name: String,
    pub label: String,
    pub format: FormatSpec,
}

impl RawDescriptor {
    /// Decode one descriptor record; `record` must hold `DESCRIPTOR_LEN` bytes
    pub fn parse(record: &[u8]) -> Self {
        Self {
            type_code: read_i16_be(record, descriptor::TYPE_CODE),
            length: read_i16_be(record, descriptor::LENGTH),
            ordinal: read_i16_be(record, descriptor::ORDINAL),
            name: read_ascii_trimmed(record, descriptor::NAME, descriptor::NAME_LEN),
            label: read_ascii_trimmed(record, descriptor::LABEL, descriptor::LABEL_LEN),
            format: FormatSpec {
                name: read_ascii_trimmed(record, descriptor::FORMAT, descriptor::FORMAT_LEN),
                width: read_i16_be(record, descriptor::FORMAT_WIDTH),
                decimals: read_i16_be(record, descriptor::FORMAT_DECIMALS),
            },
        }
    }
}

/// Decode every complete descriptor record in `section`
pub fn parse_descriptor_records(section: &[u8]) -> Vec<RawDescriptor> {
    let chunks = section.chunks_exact(DESCRIPTOR_LEN);
    let trailing = chunks.remainder().len();
    if trailing > 0 {
        debug!("Ignoring {} trailing descriptor bytes", trailing);
    }
    chunks.map(RawDescriptor::parse).collect()
}

/// Decode the descriptor section into an ordered schema
pub fn decode_schema(section: &[u8]) -> Result<Schema> {
    let raw = parse_descriptor_records(section);
    if raw.is_empty() {
        return Err(XportError::unsupported("no variable descriptors found"));
    }

    let mut indexed: Vec<(i32, usize, RawDescriptor)> = raw
        .into_iter()
        .enumerate()
        .map(|(index, desc)| {
            let ordinal = if desc.ordinal <= 0 {
                index as i32 + 1
            } else {
                desc.ordinal as i32
            };
            (ordinal, index, desc)
        })
        .collect();

    // Decode index breaks ties between equal ordinals
    indexed.sort_by_key(|(ordinal, index, _)| (*ordinal, *index));

    let columns = indexed
        .into_iter()
        .enumerate()
        .map(|(position, (ordinal, _, desc))| build_descriptor(position, ordinal, desc))
        .collect::<Vec<_>>();

    debug!("Decoded {} variable descriptors", columns.len());
    Ok(Schema::new(columns))
}

fn build_descriptor(position: usize, ordinal: i32, raw: RawDescriptor) -> VariableDescriptor {
    let kind = VariableKind::from_type_code(raw.type_code);
    let declared = raw.length.max(0) as usize;
    let length = declared.max(kind.min_length());
    if length != declared {
        warn!(
            "Variable {} declares length {}, using {}",
            position + 1,
            raw.length,
            length
        );
    }

    let name = if raw.name.is_empty() {
        format!("VAR{}", position + 1)
    } else {
        raw.name
    };
    let label = if raw.label.is_empty() {
        name.clone()
    } else {
        raw.label
    };

    VariableDescriptor {
        name,
        label,
        kind,
        length,
        ordinal,
        format: raw.format,
    }
}
