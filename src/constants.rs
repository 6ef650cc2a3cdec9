//! Format constants and classification defaults
//!
//! This module contains the fixed layout values of the XPORT transport format
//! and the default values used by the column classifier and statistics engine.

// =============================================================================
// Physical Layout
// =============================================================================

/// Physical record size; every header section starts on a multiple of this
pub const RECORD_LEN: usize = 80;

/// Size of one variable descriptor (NAMESTR) record
pub const DESCRIPTOR_LEN: usize = 140;

/// Width of a numeric cell decoded by the hexadecimal floating-point decoder
pub const NUMERIC_CELL_LEN: usize = 8;

/// Row widths are padded up to a multiple of this
pub const ROW_ALIGNMENT: usize = 8;

// =============================================================================
// Section Markers
// =============================================================================

/// Marks the start of the variable descriptor section
pub const NAMESTR_MARKER: &[u8] = b"HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!";

/// Marks the start of the observation section
pub const OBS_MARKER: &[u8] = b"HEADER RECORD*******OBS     HEADER RECORD!!!!!!!";

/// Marks the member descriptor records carrying the dataset name and label
pub const DSCRPTR_MARKER: &[u8] = b"HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!";

/// Variable descriptor field offsets
pub mod descriptor {
    pub const TYPE_CODE: usize = 0;
    pub const LENGTH: usize = 4;
    pub const ORDINAL: usize = 6;
    pub const NAME: usize = 8;
    pub const NAME_LEN: usize = 8;
    pub const LABEL: usize = 16;
    pub const LABEL_LEN: usize = 40;
    pub const FORMAT: usize = 56;
    pub const FORMAT_LEN: usize = 8;
    pub const FORMAT_WIDTH: usize = 64;
    pub const FORMAT_DECIMALS: usize = 66;

    /// Type code for numeric variables; any other value is character
    pub const NUMERIC_TYPE_CODE: i16 = 1;
}

/// Byte of a numeric cell that flags a missing value
pub const MISSING_NUMERIC_MARKER: u8 = 0x2E;

// =============================================================================
// Classification Defaults
// =============================================================================

/// Column names always treated as categorical identifiers
pub const DEFAULT_IDENTIFIER_COLUMNS: &[&str] = &[
    "STUDYID", "USUBJID", "SUBJID", "SITEID", "DOMAIN", "POOLID", "SPDEVID",
];

/// Name suffixes marking a column as carrying date-time values
pub const DEFAULT_DATETIME_SUFFIXES: &[&str] = &["DTM", "DTTM", "DATETIME"];

/// Unique/observed ratio below which character data is a factor
pub const DEFAULT_UNIQUE_RATIO_CUTOFF: f64 = 0.10;

/// Upper bound on levels for the general factor threshold
pub const DEFAULT_FACTOR_MAX_LEVELS: usize = 20;

/// Fraction of observed values used for the general factor threshold
pub const DEFAULT_FACTOR_LEVEL_FRACTION: f64 = 0.40;

// =============================================================================
// Statistics Defaults
// =============================================================================

pub const HISTOGRAM_MIN_BINS: usize = 4;
pub const HISTOGRAM_MAX_BINS: usize = 20;
pub const DENSITY_MIN_POINTS: usize = 64;
pub const DENSITY_MAX_POINTS: usize = 512;

/// Maximum fractional digits when rendering decoded numbers as text
pub const DEFAULT_DISPLAY_FRACTION_DIGITS: usize = 10;

/// Rows shown by the CLI preview unless overridden
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Factor levels shown per column by the CLI text report
pub const DEFAULT_REPORT_LEVELS: usize = 10;
