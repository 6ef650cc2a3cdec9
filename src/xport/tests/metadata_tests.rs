//! Tests for variable descriptor decoding

use super::super::metadata::{RawDescriptor, decode_schema, parse_descriptor_records};
use super::{FixtureColumn, descriptor_record};
use crate::constants::{DESCRIPTOR_LEN, descriptor};
use crate::error::XportError;
use crate::models::VariableKind;

fn section(columns: &[FixtureColumn]) -> Vec<u8> {
    columns.iter().flat_map(descriptor_record).collect()
}

#[test]
fn test_raw_descriptor_fields() {
    let mut record = descriptor_record(&FixtureColumn::numeric("WEIGHT", 4).with_label("Body Weight"));
    record[descriptor::FORMAT..descriptor::FORMAT + 8].copy_from_slice(b"8.2     ");
    record[descriptor::FORMAT_WIDTH..descriptor::FORMAT_WIDTH + 2].copy_from_slice(&8i16.to_be_bytes());
    record[descriptor::FORMAT_DECIMALS..descriptor::FORMAT_DECIMALS + 2]
        .copy_from_slice(&2i16.to_be_bytes());

    let raw = RawDescriptor::parse(&record);
    assert_eq!(raw.type_code, 1);
    assert_eq!(raw.length, 8);
    assert_eq!(raw.ordinal, 4);
    assert_eq!(raw.name, "WEIGHT");
    assert_eq!(raw.label, "Body Weight");
    assert_eq!(raw.format.name, "8.2");
    assert_eq!(raw.format.width, 8);
    assert_eq!(raw.format.decimals, 2);
}

#[test]
fn test_trailing_partial_record_is_ignored() {
    let mut bytes = section(&[
        FixtureColumn::numeric("A", 1),
        FixtureColumn::character("B", 4, 2),
    ]);
    bytes.extend(vec![b' '; DESCRIPTOR_LEN - 1]);
    assert_eq!(parse_descriptor_records(&bytes).len(), 2);
}

#[test]
fn test_no_descriptors_is_unsupported() {
    let err = decode_schema(&[b' '; DESCRIPTOR_LEN - 1]).unwrap_err();
    assert!(matches!(err, XportError::Unsupported(_)));
    assert!(err.to_string().contains("no variable descriptors"));
}

#[test]
fn test_schema_ordered_by_ordinal() {
    let schema = decode_schema(&section(&[
        FixtureColumn::numeric("THIRD", 3),
        FixtureColumn::numeric("FIRST", 1),
        FixtureColumn::character("SECOND", 5, 2),
    ]))
    .unwrap();

    let names: Vec<&str> = schema.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["FIRST", "SECOND", "THIRD"]);
    assert_eq!(schema.columns[1].kind, VariableKind::Character);
    assert_eq!(schema.logical_width(), 21);
}

#[test]
fn test_non_positive_ordinals_use_decode_position() {
    // Positions 1 and 2 get effective ordinals 1 and 2; ties keep decode order
    let schema = decode_schema(&section(&[
        FixtureColumn::numeric("ZERO", 0),
        FixtureColumn::numeric("NEG", -5),
        FixtureColumn::numeric("TWO", 2),
        FixtureColumn::numeric("ONE", 1),
    ]))
    .unwrap();

    let names: Vec<&str> = schema.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ZERO", "ONE", "NEG", "TWO"]);
    assert_eq!(schema.columns[0].ordinal, 1);
    assert_eq!(schema.columns[2].ordinal, 2);
}

#[test]
fn test_lengths_are_clamped_to_kind_minimum() {
    let mut short_numeric = FixtureColumn::numeric("SHORTNUM", 1);
    short_numeric.length = 3;
    let schema = decode_schema(&section(&[
        short_numeric,
        FixtureColumn::character("EMPTY", 0, 2),
        FixtureColumn::character("NEGATIVE", -4, 3),
    ]))
    .unwrap();

    assert_eq!(schema.columns[0].length, 8);
    assert_eq!(schema.columns[1].length, 1);
    assert_eq!(schema.columns[2].length, 1);
}

#[test]
fn test_blank_names_and_labels_are_synthesized() {
    let schema = decode_schema(&section(&[
        FixtureColumn::numeric("AGE", 1).with_label("Age in Years"),
        FixtureColumn::numeric("", 2),
        FixtureColumn::character("RACE", 10, 3),
    ]))
    .unwrap();

    assert_eq!(schema.columns[0].label, "Age in Years");
    assert_eq!(schema.columns[1].name, "VAR2");
    assert_eq!(schema.columns[1].label, "VAR2");
    assert_eq!(schema.columns[2].label, "RACE");
    assert_eq!(schema.index_of("RACE"), Some(2));
}
