//! XPT Profiler Library
//!
//! Decodes legacy fixed-record XPORT transport files into a column schema and
//! a table of cells, then classifies each column and computes descriptive
//! statistics for it.
//!
//! This library provides tools for:
//! - Locating transport sections and decoding variable descriptors
//! - Decoding hexadecimal floating-point cells without losing precision
//! - Resolving padded row widths and decoding observation rows
//! - Classifying columns as numeric, date, factor or free text
//! - Percentiles, histograms and kernel density estimates per column

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod profile;
pub mod xport;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod report;
}

// Re-export commonly used types
pub use config::{ClassifierConfig, ProfilerConfig};
pub use error::{Result, XportError};
pub use models::{Cell, Schema, Table, VariableDescriptor, VariableKind};
pub use profile::{ClassifiedType, ColumnStatistics, ColumnSummary, StatisticsCache};
pub use xport::{XportReader, decode};
