//! Test utilities and fixture builders for transport decoding tests
//!
//! Builds synthetic transport buffers record by record so tests can exercise
//! each decoding stage against known layouts.

use crate::constants::{
    DESCRIPTOR_LEN, DSCRPTR_MARKER, NAMESTR_MARKER, OBS_MARKER, RECORD_LEN, descriptor,
};
use crate::models::VariableKind;

mod metadata_tests;
mod reader_tests;

/// Column definition used to build fixture buffers
#[derive(Debug, Clone)]
pub struct FixtureColumn {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: VariableKind,
    pub length: i16,
    pub ordinal: i16,
}

impl FixtureColumn {
    pub fn numeric(name: &'static str, ordinal: i16) -> Self {
        Self {
            name,
            label: "",
            kind: VariableKind::Numeric,
            length: 8,
            ordinal,
        }
    }

    pub fn character(name: &'static str, length: i16, ordinal: i16) -> Self {
        Self {
            name,
            label: "",
            kind: VariableKind::Character,
            length,
            ordinal,
        }
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

/// Cell value used to build fixture rows
#[derive(Debug, Clone)]
pub enum FixtureValue {
    Num(f64),
    Missing,
    Str(&'static str),
}

/// Encode a value in the hexadecimal floating-point layout
pub fn encode_hex_float(value: f64) -> [u8; 8] {
    if value == 0.0 {
        return [0; 8];
    }
    let sign = if value < 0.0 { 0x80u8 } else { 0 };
    let mut mantissa = value.abs();
    let mut exponent: i32 = 0;
    while mantissa >= 1.0 {
        mantissa /= 16.0;
        exponent += 1;
    }
    while mantissa < 1.0 / 16.0 {
        mantissa *= 16.0;
        exponent -= 1;
    }
    let fraction = (mantissa * 72_057_594_037_927_936.0).round() as u64;
    let fraction = fraction.min((1u64 << 56) - 1);

    let mut bytes = [0u8; 8];
    bytes[0] = sign | ((exponent + 64) as u8 & 0x7F);
    bytes[1..].copy_from_slice(&fraction.to_be_bytes()[1..]);
    bytes
}

/// Encode a single descriptor record
pub fn descriptor_record(column: &FixtureColumn) -> Vec<u8> {
    let mut record = vec![0u8; DESCRIPTOR_LEN];
    let type_code: i16 = match column.kind {
        VariableKind::Numeric => 1,
        VariableKind::Character => 2,
    };
    record[descriptor::TYPE_CODE..descriptor::TYPE_CODE + 2]
        .copy_from_slice(&type_code.to_be_bytes());
    record[descriptor::LENGTH..descriptor::LENGTH + 2]
        .copy_from_slice(&column.length.to_be_bytes());
    record[descriptor::ORDINAL..descriptor::ORDINAL + 2]
        .copy_from_slice(&column.ordinal.to_be_bytes());
    write_padded(&mut record, descriptor::NAME, descriptor::NAME_LEN, column.name);
    write_padded(&mut record, descriptor::LABEL, descriptor::LABEL_LEN, column.label);
    write_padded(&mut record, descriptor::FORMAT, descriptor::FORMAT_LEN, "");
    record
}

fn write_padded(buf: &mut [u8], offset: usize, len: usize, text: &str) {
    let field = &mut buf[offset..offset + len];
    field.fill(b' ');
    let bytes = text.as_bytes();
    let n = bytes.len().min(len);
    field[..n].copy_from_slice(&bytes[..n]);
}

/// A full 80-byte record starting with `text`, space padded
pub fn text_record(text: &[u8]) -> Vec<u8> {
    let mut record = vec![b' '; RECORD_LEN];
    record[..text.len()].copy_from_slice(text);
    record
}

fn pad_to_record(buf: &mut Vec<u8>) {
    let rem = buf.len() % RECORD_LEN;
    if rem != 0 {
        buf.extend(std::iter::repeat_n(b' ', RECORD_LEN - rem));
    }
}

/// Encode rows using each column's declared length
pub fn encode_rows(columns: &[FixtureColumn], rows: &[Vec<FixtureValue>]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows {
        for (column, value) in columns.iter().zip(row) {
            let width = column.length.max(0) as usize;
            match value {
                FixtureValue::Num(v) => {
                    let mut cell = encode_hex_float(*v).to_vec();
                    cell.resize(width, 0);
                    out.extend(cell);
                }
                FixtureValue::Missing => {
                    let mut cell = vec![0u8; width];
                    if column.kind == VariableKind::Numeric {
                        cell[0] = 0x2E;
                    } else {
                        cell.fill(b' ');
                    }
                    out.extend(cell);
                }
                FixtureValue::Str(s) => {
                    let mut cell = vec![b' '; width];
                    let n = s.len().min(width);
                    cell[..n].copy_from_slice(&s.as_bytes()[..n]);
                    out.extend(cell);
                }
            }
        }
    }
    out
}

/// Build the header portion up to and including the observation marker record
pub fn build_header(columns: &[FixtureColumn]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend(text_record(
        b"HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!000000000000000000000000000000",
    ));
    buf.extend(text_record(b"SAS     SAS     SASLIB  9.4     X64_10PR"));
    buf.extend(text_record(b"01JAN24:00:00:00"));
    buf.extend(text_record(
        b"HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!000000000000000001600000000140",
    ));
    buf.extend(text_record(DSCRPTR_MARKER));
    buf.extend(text_record(b"SAS     DM      SASDATA 9.4     X64_10PR"));
    let mut second = text_record(b"01JAN24:00:00:00");
    second[32..32 + 12].copy_from_slice(b"Demographics");
    buf.extend(second);
    buf.extend(text_record(NAMESTR_MARKER));
    for column in columns {
        buf.extend(descriptor_record(column));
    }
    pad_to_record(&mut buf);
    buf.extend(text_record(OBS_MARKER));
    buf
}

/// Build a complete transport buffer without trailing observation padding
pub fn build_transport(columns: &[FixtureColumn], rows: &[Vec<FixtureValue>]) -> Vec<u8> {
    let mut buf = build_header(columns);
    buf.extend(encode_rows(columns, rows));
    buf
}

/// Three-column fixture used across tests
pub fn demographics_columns() -> Vec<FixtureColumn> {
    vec![
        FixtureColumn::character("USUBJID", 6, 1).with_label("Unique Subject Identifier"),
        FixtureColumn::numeric("AGE", 2).with_label("Age"),
        FixtureColumn::character("SEX", 1, 3).with_label("Sex"),
    ]
}

pub fn demographics_rows() -> Vec<Vec<FixtureValue>> {
    use FixtureValue::*;
    vec![
        vec![Str("S-001"), Num(34.0), Str("F")],
        vec![Str("S-002"), Num(51.0), Str("M")],
        vec![Str("S-003"), Missing, Str("F")],
        vec![Str("S-004"), Num(47.5), Missing],
    ]
}
