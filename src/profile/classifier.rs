//! Semantic type classification of decoded columns
//!
//! Assigns each column a semantic type from its complete set of values, its
//! declared storage kind and its name. The decision order is:
//!
//! 1. identifier column names are factors
//! 2. all values numeric → numeric (integer when no value has a fraction)
//! 3. all values dates → date (with time when any value or the name says so)
//! 4. declared numeric storage → numeric, as a fallback
//! 5. character data → factor or free text by cardinality heuristics

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::parse_date;
use super::values::ColumnValues;
use crate::config::ClassifierConfig;
use crate::models::VariableKind;

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedType {
    Numeric { is_integer: bool },
    Factor,
    Date { has_time: bool },
    Text,
}

impl fmt::Display for ClassifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedType::Numeric { is_integer: true } => write!(f, "integer"),
            ClassifiedType::Numeric { is_integer: false } => write!(f, "numeric"),
            ClassifiedType::Factor => write!(f, "factor"),
            ClassifiedType::Date { has_time: true } => write!(f, "datetime"),
            ClassifiedType::Date { has_time: false } => write!(f, "date"),
            ClassifiedType::Text => write!(f, "text"),
        }
    }
}

/// Classify one column
pub fn classify_column(
    name: &str,
    kind: VariableKind,
    values: &ColumnValues,
    config: &ClassifierConfig,
) -> ClassifiedType {
    if config.is_identifier(name) {
        return ClassifiedType::Factor;
    }

    if values.observed.is_empty() {
        return match kind {
            VariableKind::Numeric => ClassifiedType::Numeric { is_integer: false },
            VariableKind::Character => ClassifiedType::Text,
        };
    }

    if let Some(is_integer) = numeric_shape(values) {
        return ClassifiedType::Numeric { is_integer };
    }

    if let Some(any_time) = date_shape(values) {
        return ClassifiedType::Date {
            has_time: any_time || config.has_datetime_suffix(name),
        };
    }

    if kind == VariableKind::Numeric {
        return ClassifiedType::Numeric { is_integer: false };
    }

    classify_character(values, config)
}

/// `Some(is_integer)` when every observed value is a finite number
fn numeric_shape(values: &ColumnValues) -> Option<bool> {
    let mut is_integer = true;
    for value in &values.observed {
        let number = value.as_number()?;
        if number.fract() != 0.0 {
            is_integer = false;
        }
    }
    Some(is_integer)
}

/// `Some(any_time)` when every observed value parses as a date
fn date_shape(values: &ColumnValues) -> Option<bool> {
    let mut any_time = false;
    for text in values.texts() {
        any_time |= parse_date(text)?.has_time;
    }
    Some(any_time)
}

fn classify_character(values: &ColumnValues, config: &ClassifierConfig) -> ClassifiedType {
    let mut lengths = values.texts().map(|t| t.chars().count());
    let first = lengths.next().unwrap_or(0);
    if lengths.all(|len| len == first) {
        return ClassifiedType::Factor;
    }

    if values.missing == 0 {
        return ClassifiedType::Factor;
    }

    let observed = values.observed_count();
    let unique = values.unique_count();
    if (unique as f64) / (observed.max(1) as f64) < config.unique_ratio_cutoff {
        return ClassifiedType::Factor;
    }

    if unique <= config.factor_level_threshold(observed) {
        return ClassifiedType::Factor;
    }

    ClassifiedType::Text
}
