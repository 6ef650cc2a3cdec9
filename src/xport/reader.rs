//! Transport file decoding pipeline
//!
//! Coordinates header location, descriptor decoding and observation decoding
//! into a single `Table`. Decoding is a pure function of the input bytes; the
//! async entry point only reads the file and moves the CPU-bound work onto a
//! blocking worker.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::header::{locate_sections, read_dataset_info};
use super::metadata::decode_schema;
use super::observations::decode_rows;
use crate::error::{Result, XportError};
use crate::models::Table;

/// Decode a complete transport buffer
pub fn decode(buffer: &[u8]) -> Result<Table> {
    let start = Instant::now();

    let offsets = locate_sections(buffer)?;
    let schema = decode_schema(&buffer[offsets.metadata_start..offsets.metadata_end])?;
    debug!(
        "Schema: {}",
        schema
            .iter()
            .map(|c| format!("{}({}:{})", c.name, c.kind, c.length))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let rows = decode_rows(&buffer[offsets.observation_start..], &schema)?;
    let dataset = read_dataset_info(buffer);

    info!(
        "Decoded {} columns x {} rows in {:?}",
        schema.len(),
        rows.len(),
        start.elapsed()
    );

    Ok(Table {
        schema,
        rows,
        dataset,
    })
}

/// Reader for transport files on disk
#[derive(Debug, Default, Clone)]
pub struct XportReader;

impl XportReader {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode a file without blocking the async runtime
    pub async fn read_file(&self, path: &Path) -> Result<Arc<Table>> {
        info!("Reading transport file: {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            XportError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {}", path.display(), e),
            ))
        })?;
        debug!("Read {} bytes", bytes.len());

        let table = tokio::task::spawn_blocking(move || decode(&bytes)).await??;
        Ok(Arc::new(table))
    }

    /// Blocking variant of [`XportReader::read_file`]
    pub fn read_file_blocking(&self, path: &Path) -> Result<Table> {
        let bytes = std::fs::read(path)?;
        decode(&bytes)
    }
}
