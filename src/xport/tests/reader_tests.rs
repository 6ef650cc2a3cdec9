//! Tests for the end-to-end decoding pipeline

use std::io::Write;
use tempfile::NamedTempFile;

use super::super::reader::{XportReader, decode};
use super::{FixtureColumn, FixtureValue, build_transport, demographics_columns, demographics_rows};
use crate::error::XportError;
use crate::models::{Cell, VariableKind};

#[test]
fn test_decode_round_trip_schema_and_rows() {
    let columns = demographics_columns();
    let rows = demographics_rows();
    let table = decode(&build_transport(&columns, &rows)).unwrap();

    assert_eq!(table.column_count(), columns.len());
    assert_eq!(table.row_count(), rows.len());
    for (decoded, fixture) in table.schema.iter().zip(&columns) {
        assert_eq!(decoded.name, fixture.name);
        assert_eq!(decoded.label, fixture.label);
        assert_eq!(decoded.kind, fixture.kind);
        assert_eq!(decoded.length, fixture.length as usize);
    }
    assert_eq!(table.dataset.name.as_deref(), Some("DM"));
}

#[test]
fn test_decode_reorders_columns_by_ordinal() {
    let columns = vec![
        FixtureColumn::character("NAME", 4, 2),
        FixtureColumn::numeric("ID", 1),
    ];
    let rows = vec![
        vec![FixtureValue::Str("ANNA"), FixtureValue::Num(1.0)],
        vec![FixtureValue::Str("BO"), FixtureValue::Num(2.0)],
    ];
    // Rows are stored in schema order, so encode them with the sorted columns
    let sorted = vec![columns[1].clone(), columns[0].clone()];
    let sorted_rows: Vec<Vec<FixtureValue>> = rows
        .iter()
        .map(|r| vec![r[1].clone(), r[0].clone()])
        .collect();
    let mut buffer = super::build_header(&columns);
    buffer.extend(super::encode_rows(&sorted, &sorted_rows));

    let table = decode(&buffer).unwrap();
    assert_eq!(table.schema.columns[0].name, "ID");
    assert_eq!(table.schema.columns[0].kind, VariableKind::Numeric);
    assert_eq!(table.rows[1], vec![Cell::Number(2.0), Cell::Text("BO".to_string())]);
}

#[test]
fn test_decode_errors_are_surfaced() {
    assert!(matches!(decode(b"not a transport file"), Err(XportError::Format(_))));

    let columns = demographics_columns();
    let mut buffer = build_transport(&columns, &demographics_rows());
    buffer.extend(b"XY");
    let err = decode(&buffer).unwrap_err();
    assert!(matches!(err, XportError::Unsupported(_)));
    assert!(err.is_decode_error());
}

#[tokio::test]
async fn test_read_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&build_transport(&demographics_columns(), &demographics_rows()))
        .unwrap();

    let reader = XportReader::new();
    let table = reader.read_file(file.path()).await.unwrap();
    assert_eq!(table.row_count(), 4);

    let blocking = reader.read_file_blocking(file.path()).unwrap();
    assert_eq!(blocking.rows, table.rows);
}

#[tokio::test]
async fn test_read_missing_file_is_io_error() {
    let err = XportReader::new()
        .read_file(std::path::Path::new("/nonexistent/file.xpt"))
        .await
        .unwrap_err();
    assert!(matches!(err, XportError::Io(_)));
    assert!(!err.is_decode_error());
}
