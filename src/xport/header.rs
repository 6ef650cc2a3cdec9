//! Transport header location and section boundaries.
//!
//! Finds the variable descriptor and observation section markers and
//! calculates the record-aligned offsets where each section's payload begins.

use tracing::debug;

use super::fields::{find_bytes, read_ascii_trimmed};
use crate::constants::{DSCRPTR_MARKER, NAMESTR_MARKER, OBS_MARKER, RECORD_LEN};
use crate::error::{Result, XportError};
use crate::models::DatasetInfo;

/// Byte offsets of the two payload sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    /// First byte of the descriptor records
    pub metadata_start: usize,
    /// Start of the observation marker; descriptors end here
    pub metadata_end: usize,
    /// First byte of the observation rows
    pub observation_start: usize,
}

impl SectionOffsets {
    pub fn metadata_len(&self) -> usize {
        self.metadata_end - self.metadata_start
    }
}

/// Round `offset` up to the next physical record boundary
pub fn align_to_record(offset: usize) -> usize {
    let rem = offset % RECORD_LEN;
    if rem != 0 {
        offset + (RECORD_LEN - rem)
    } else {
        offset
    }
}

/// Locate the descriptor and observation sections in a transport buffer
pub fn locate_sections(buffer: &[u8]) -> Result<SectionOffsets> {
    if buffer.len() < RECORD_LEN {
        return Err(XportError::format(format!(
            "buffer of {} bytes is shorter than one {}-byte record",
            buffer.len(),
            RECORD_LEN
        )));
    }

    let namestr_pos = find_bytes(buffer, NAMESTR_MARKER, 0)
        .ok_or_else(|| XportError::format("variable descriptor marker not found"))?;

    let obs_pos = find_bytes(buffer, OBS_MARKER, namestr_pos + NAMESTR_MARKER.len())
        .ok_or_else(|| XportError::format("observation marker not found"))?;

    let metadata_start = align_to_record(namestr_pos + NAMESTR_MARKER.len());
    let metadata_end = obs_pos;

    if metadata_end <= metadata_start {
        return Err(XportError::format(format!(
            "descriptor section is empty (starts at {}, observation marker at {})",
            metadata_start, metadata_end
        )));
    }

    let observation_start = align_to_record(obs_pos + OBS_MARKER.len()).min(buffer.len());

    debug!(
        "Located sections: metadata=[{}, {}), observations from {}",
        metadata_start, metadata_end, observation_start
    );

    Ok(SectionOffsets {
        metadata_start,
        metadata_end,
        observation_start,
    })
}

/// Read the member name and label from the descriptor header records
///
/// The first record after the marker carries the member name at bytes 8..16,
/// the second carries the label at bytes 32..72. Anything absent is `None`.
pub fn read_dataset_info(buffer: &[u8]) -> DatasetInfo {
    let Some(marker_pos) = find_bytes(buffer, DSCRPTR_MARKER, 0) else {
        return DatasetInfo::default();
    };

    let first = align_to_record(marker_pos + DSCRPTR_MARKER.len());
    let second = first + RECORD_LEN;

    let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };

    let name = (buffer.len() >= second)
        .then(|| read_ascii_trimmed(buffer, first + 8, 8))
        .and_then(non_empty);
    let label = (buffer.len() >= second + RECORD_LEN)
        .then(|| read_ascii_trimmed(buffer, second + 32, 40))
        .and_then(non_empty);

    DatasetInfo { name, label }
}
