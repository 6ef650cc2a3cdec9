//! XPORT transport file decoder
//!
//! Decodes the fixed-record transport format into a schema and a table of
//! cells. The format is laid out in 80-byte physical records:
//!
//! ```text
//!  library / member headers
//!  HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!   ─┐
//!  140-byte variable descriptors ...                   │ header::locate_sections
//!  HEADER RECORD*******OBS     HEADER RECORD!!!!!!!   ─┘
//!  fixed-width observation rows ...                     observations::decode_rows
//! ```
//!
//! ## Architecture
//!
//! - [`header`] - section marker location and record alignment
//! - [`metadata`] - variable descriptor decoding and ordering
//! - [`numeric`] - hexadecimal floating-point cells and display formatting
//! - [`observations`] - row width resolution and row decoding
//! - [`reader`] - pipeline orchestration and file reading
//! - [`fields`] - byte-level field helpers
//!
//! ## Usage
//!
//! ```no_run
//! use xpt_profiler::xport::XportReader;
//!
//! # async fn example() -> xpt_profiler::Result<()> {
//! let table = XportReader::new()
//!     .read_file(std::path::Path::new("dm.xpt"))
//!     .await?;
//! println!("{} rows, {} columns", table.row_count(), table.column_count());
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod header;
pub mod metadata;
pub mod numeric;
pub mod observations;
pub mod reader;

#[cfg(test)]
pub mod tests;

pub use header::{SectionOffsets, align_to_record, locate_sections};
pub use metadata::decode_schema;
pub use numeric::{decode_hex_float, format_numeric};
pub use observations::{RowLayout, decode_rows, resolve_row_layout};
pub use reader::{XportReader, decode};
