//! Per-column statistics
//!
//! Each semantic type has its own summary: numeric columns get the full
//! descriptive summary, date columns the same machinery over day offsets plus
//! a per-day timeline, factors a level table, and free text a summary of value
//! lengths. Computation never fails; sparse or empty columns produce zeros and
//! empty sequences.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::classifier::{ClassifiedType, classify_column};
use super::dates::parse_date;
use super::descriptive::NumericSummary;
use super::values::ColumnValues;
use crate::config::ClassifierConfig;
use crate::models::{Table, VariableKind};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Value counts shared by every statistics variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCounts {
    pub total: usize,
    pub observed: usize,
    pub missing: usize,
    pub unique: usize,
}

impl ValueCounts {
    pub fn from_values(values: &ColumnValues) -> Self {
        Self {
            total: values.total,
            observed: values.observed_count(),
            missing: values.missing,
            unique: values.unique_count(),
        }
    }

    /// Share of missing values in `[0, 1]`; 0 for an empty column
    pub fn missing_ratio(&self) -> f64 {
        ratio(self.missing, self.total)
    }
}

/// One level of a factor column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorLevel {
    pub value: String,
    pub count: usize,
    /// `count / max(observed, 1)`
    pub share: f64,
}

/// Occurrences on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub count: usize,
}

/// Summary of a date column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateSummary {
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
    pub mean: Option<NaiveDateTime>,
    pub q1: Option<NaiveDateTime>,
    pub median: Option<NaiveDateTime>,
    pub q3: Option<NaiveDateTime>,
    /// Summary of fractional day offsets from `earliest`
    pub offsets: NumericSummary,
    pub timeline: Vec<TimelineEntry>,
}

/// Statistics for one column, aligned with its classified type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnStatistics {
    Numeric {
        counts: ValueCounts,
        is_integer: bool,
        summary: NumericSummary,
    },
    Date {
        counts: ValueCounts,
        has_time: bool,
        summary: DateSummary,
    },
    Factor {
        counts: ValueCounts,
        levels: Vec<FactorLevel>,
    },
    Text {
        counts: ValueCounts,
        lengths: NumericSummary,
    },
}

impl ColumnStatistics {
    pub fn counts(&self) -> &ValueCounts {
        match self {
            ColumnStatistics::Numeric { counts, .. }
            | ColumnStatistics::Date { counts, .. }
            | ColumnStatistics::Factor { counts, .. }
            | ColumnStatistics::Text { counts, .. } => counts,
        }
    }

    pub fn classified_type(&self) -> ClassifiedType {
        match self {
            ColumnStatistics::Numeric { is_integer, .. } => ClassifiedType::Numeric {
                is_integer: *is_integer,
            },
            ColumnStatistics::Date { has_time, .. } => ClassifiedType::Date {
                has_time: *has_time,
            },
            ColumnStatistics::Factor { .. } => ClassifiedType::Factor,
            ColumnStatistics::Text { .. } => ClassifiedType::Text,
        }
    }
}

/// Compute statistics for values already classified as `classified`
pub fn compute_statistics(values: &ColumnValues, classified: ClassifiedType) -> ColumnStatistics {
    let counts = ValueCounts::from_values(values);
    match classified {
        ClassifiedType::Numeric { is_integer } => ColumnStatistics::Numeric {
            counts,
            is_integer,
            summary: NumericSummary::from_values(
                values.observed.iter().filter_map(|v| v.as_number()).collect(),
            ),
        },
        ClassifiedType::Date { has_time } => ColumnStatistics::Date {
            counts,
            has_time,
            summary: date_summary(values),
        },
        ClassifiedType::Factor => ColumnStatistics::Factor {
            counts,
            levels: factor_levels(values),
        },
        ClassifiedType::Text => ColumnStatistics::Text {
            counts,
            lengths: NumericSummary::from_values(
                values.texts().map(|t| t.chars().count() as f64).collect(),
            ),
        },
    }
}

/// Level table sorted by count descending, then value ascending
pub fn factor_levels(values: &ColumnValues) -> Vec<FactorLevel> {
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for text in values.texts() {
        *tally.entry(text).or_default() += 1;
    }

    let observed = values.observed_count();
    let mut levels: Vec<FactorLevel> = tally
        .into_iter()
        .map(|(value, count)| FactorLevel {
            value: value.to_string(),
            count,
            share: ratio(count, observed),
        })
        .collect();
    levels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    levels
}

fn date_summary(values: &ColumnValues) -> DateSummary {
    let mut parsed: Vec<NaiveDateTime> = values
        .texts()
        .filter_map(|t| parse_date(t).map(|d| d.value))
        .collect();
    if parsed.is_empty() {
        return DateSummary::default();
    }
    parsed.sort();

    let earliest = parsed[0];
    let latest = parsed[parsed.len() - 1];
    let offsets = NumericSummary::from_values(
        parsed
            .iter()
            .map(|d| (*d - earliest).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY)
            .collect(),
    );

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for d in &parsed {
        *per_day.entry(d.date()).or_default() += 1;
    }

    let at = |days: f64| {
        let millis = (days * SECONDS_PER_DAY * 1000.0).round() as i64;
        TimeDelta::try_milliseconds(millis).and_then(|d| earliest.checked_add_signed(d))
    };

    DateSummary {
        earliest: Some(earliest),
        latest: Some(latest),
        mean: at(offsets.mean),
        q1: at(offsets.q1),
        median: at(offsets.median),
        q3: at(offsets.q3),
        offsets,
        timeline: per_day
            .into_iter()
            .map(|(date, count)| TimelineEntry { date, count })
            .collect(),
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Classification and statistics for one column of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub index: usize,
    pub name: String,
    pub label: String,
    pub kind: VariableKind,
    pub classified: ClassifiedType,
    pub statistics: ColumnStatistics,
}

/// Classify and summarize column `index` of `table`
///
/// Returns `None` when the index is outside the schema.
pub fn summarize_column(
    table: &Table,
    index: usize,
    config: &ClassifierConfig,
) -> Option<ColumnSummary> {
    let column = table.schema.columns.get(index)?;
    let values = ColumnValues::from_table(table, index);
    let classified = classify_column(&column.name, column.kind, &values, config);
    let statistics = compute_statistics(&values, classified);

    Some(ColumnSummary {
        index,
        name: column.name.clone(),
        label: column.label.clone(),
        kind: column.kind,
        classified,
        statistics,
    })
}
