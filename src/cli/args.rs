//! Command-line argument definitions for the XPT profiler
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Result, XportError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the XPT profiler
///
/// Decodes an XPORT transport file and reports its schema, a preview of its
/// rows and a statistical summary of each column.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xpt-profiler",
    version,
    about = "Decode XPORT transport files and summarize their columns",
    long_about = "Decodes a legacy fixed-record XPORT (.xpt) transport file, prints its \
                  variable schema and a preview of the decoded rows, and classifies every \
                  column as numeric, date, factor or free text with type-specific statistics."
)]
pub struct Args {
    /// Transport file to decode
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only summarize these columns (repeatable)
    #[arg(
        short = 'c',
        long = "column",
        value_name = "NAME",
        help = "Only summarize the named column (repeatable)"
    )]
    pub columns: Vec<String>,

    /// Output format for the report
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format"
    )]
    pub format: OutputFormat,

    /// Number of decoded rows to print before the summaries
    #[arg(
        long = "preview",
        value_name = "ROWS",
        help = "Number of rows to preview (overrides the config file)"
    )]
    pub preview_rows: Option<usize>,

    /// Print only the schema, skipping statistics
    #[arg(long = "schema-only", help = "Print the schema and row count only")]
    pub schema_only: bool,

    /// Path to a JSON configuration file with classifier thresholds
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of columns summarized concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers (defaults to CPU count)"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress everything except errors
    #[arg(short = 'q', long = "quiet", help = "Only log errors")]
    pub quiet: bool,
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// Machine-readable JSON document
    Json,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Worker count, defaulting to the number of CPUs
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Reject argument combinations that cannot be honored
    pub fn validate(&self) -> Result<()> {
        if self.quiet && self.verbose > 0 {
            return Err(XportError::configuration(
                "--quiet and --verbose cannot be used together",
            ));
        }
        if self.workers == Some(0) {
            return Err(XportError::configuration("--workers must be at least 1"));
        }
        if self.schema_only && !self.columns.is_empty() {
            return Err(XportError::configuration(
                "--schema-only cannot be combined with --column",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["xpt-profiler", "dm.xpt"]).unwrap();
        assert_eq!(args.file, PathBuf::from("dm.xpt"));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.columns.is_empty());
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "xpt-profiler",
            "ae.xpt",
            "-c",
            "AETERM",
            "--column",
            "AESEV",
            "--format",
            "json",
            "--preview",
            "3",
            "-j",
            "2",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.columns, vec!["AETERM", "AESEV"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.preview_rows, Some(3));
        assert_eq!(args.worker_count(), 2);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_conflicting_flags_are_rejected() {
        let args = Args::try_parse_from(["xpt-profiler", "dm.xpt", "-q", "-v"]).unwrap();
        assert!(args.validate().is_err());

        let args = Args::try_parse_from(["xpt-profiler", "dm.xpt", "-j", "0"]).unwrap();
        assert!(args.validate().is_err());

        let args =
            Args::try_parse_from(["xpt-profiler", "dm.xpt", "--schema-only", "-c", "AGE"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_missing_file_argument() {
        assert!(Args::try_parse_from(["xpt-profiler"]).is_err());
    }
}
