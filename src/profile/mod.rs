//! Column classification and statistics
//!
//! Turns decoded columns into semantic types and type-specific summaries.
//!
//! ```text
//!   Table column ──► values ──► classifier ──► ClassifiedType
//!                       │                           │
//!                       └──────────► stats ◄────────┘
//!                                      │
//!                                      ▼
//!                               ColumnStatistics
//! ```
//!
//! - [`values`] - observed/missing split of one column
//! - [`dates`] - recognized date and date-time grammars
//! - [`classifier`] - semantic type heuristics
//! - [`descriptive`] - percentiles, spread, histogram and density
//! - [`stats`] - per-type statistics and column summaries
//! - [`cache`] - memoization and concurrent fan-out across columns

pub mod cache;
pub mod classifier;
pub mod dates;
pub mod descriptive;
pub mod stats;
pub mod values;

#[cfg(test)]
pub mod tests;

pub use cache::{StatisticsCache, summarize_all, summarize_columns, summarize_table};
pub use classifier::{ClassifiedType, classify_column};
pub use descriptive::{NumericSummary, percentile};
pub use stats::{ColumnStatistics, ColumnSummary, ValueCounts, compute_statistics, summarize_column};
pub use values::ColumnValues;
