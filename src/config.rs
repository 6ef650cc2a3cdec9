//! Configuration management and validation.
//!
//! Provides the classifier thresholds and display settings used when
//! profiling a decoded table. Configuration is layered: defaults, then an
//! optional JSON file, then command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::{
    DEFAULT_DATETIME_SUFFIXES, DEFAULT_DISPLAY_FRACTION_DIGITS, DEFAULT_FACTOR_LEVEL_FRACTION,
    DEFAULT_FACTOR_MAX_LEVELS, DEFAULT_IDENTIFIER_COLUMNS, DEFAULT_PREVIEW_ROWS,
    DEFAULT_REPORT_LEVELS, DEFAULT_UNIQUE_RATIO_CUTOFF,
};
use crate::error::{Result, XportError};

/// Heuristic thresholds for semantic type classification
///
/// These are calibrated for clinical-trial style datasets and are exposed so
/// other conventions can tune them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Column names always classified as factors
    pub identifier_columns: Vec<String>,

    /// Name suffixes (case-insensitive) that mark date-time columns
    pub datetime_suffixes: Vec<String>,

    /// Character data with unique/observed below this ratio is a factor
    pub unique_ratio_cutoff: f64,

    /// Upper bound on levels for the general factor threshold
    pub factor_max_levels: usize,

    /// Fraction of observed values used for the general factor threshold
    pub factor_level_fraction: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            identifier_columns: DEFAULT_IDENTIFIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            datetime_suffixes: DEFAULT_DATETIME_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unique_ratio_cutoff: DEFAULT_UNIQUE_RATIO_CUTOFF,
            factor_max_levels: DEFAULT_FACTOR_MAX_LEVELS,
            factor_level_fraction: DEFAULT_FACTOR_LEVEL_FRACTION,
        }
    }
}

impl ClassifierConfig {
    /// Whether `name` is one of the configured identifier columns
    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier_columns.iter().any(|id| id == name)
    }

    /// Whether `name` follows a configured date-time naming convention
    pub fn has_datetime_suffix(&self, name: &str) -> bool {
        let upper = name.to_ascii_uppercase();
        self.datetime_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && upper.ends_with(&suffix.to_ascii_uppercase()))
    }

    /// General low-cardinality threshold for `observed` values
    pub fn factor_level_threshold(&self, observed: usize) -> usize {
        let by_fraction = (self.factor_level_fraction * observed as f64).round() as usize;
        self.factor_max_levels.min(by_fraction)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.unique_ratio_cutoff) {
            return Err(XportError::configuration(format!(
                "unique_ratio_cutoff must be within [0, 1], got {}",
                self.unique_ratio_cutoff
            )));
        }
        if !(0.0..=1.0).contains(&self.factor_level_fraction) {
            return Err(XportError::configuration(format!(
                "factor_level_fraction must be within [0, 1], got {}",
                self.factor_level_fraction
            )));
        }
        Ok(())
    }
}

/// Presentation settings for decoded values and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum fractional digits when rendering numbers
    pub fraction_digits: usize,

    /// Rows shown in the table preview
    pub preview_rows: usize,

    /// Factor levels listed per column in text reports
    pub report_levels: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_DISPLAY_FRACTION_DIGITS,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            report_levels: DEFAULT_REPORT_LEVELS,
        }
    }
}

/// Complete profiler configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    pub classifier: ClassifierConfig,
    pub display: DisplayConfig,
}

impl ProfilerConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            XportError::configuration(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        if self.display.fraction_digits > 17 {
            return Err(XportError::configuration(format!(
                "fraction_digits must be at most 17, got {}",
                self.display.fraction_digits
            )));
        }
        Ok(())
    }
}
