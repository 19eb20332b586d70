use lembar::{
    storage::schema::{TableSchema, TableSchemaBuilder},
    types::{
        ROW_FORMAT_VERSION,
        error::DatabaseError,
        row::{Row, RowLocation},
        value::Value,
    },
};

fn users_schema() -> TableSchema {
    TableSchemaBuilder::new("users")
        .int_column("id")
        .text_column("name")
        .build()
}

#[test]
fn test_row_encoding_layout() {
    let schema = users_schema();
    let row = Row::new(vec![Value::Int32(1), Value::Text("Al".to_string())]);

    let bytes = row.encode(&schema).unwrap();
    let mut expected = Vec::new();
    expected.extend_from_slice(&ROW_FORMAT_VERSION.to_le_bytes());
    expected.extend_from_slice(&1i32.to_le_bytes());
    expected.extend_from_slice(&2u32.to_le_bytes());
    expected.extend_from_slice(b"Al");

    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), row.size());
}

#[test]
fn test_row_decode_restores_values() {
    let schema = users_schema();
    let row = Row::new(vec![
        Value::Int32(-42),
        Value::Text("héllo wörld".to_string()),
    ]);

    let decoded = Row::decode(&schema, &row.encode(&schema).unwrap()).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn test_empty_text_is_allowed() {
    let schema = users_schema();
    let row = Row::new(vec![Value::Int32(0), Value::Text(String::new())]);
    let bytes = row.encode(&schema).unwrap();
    assert_eq!(bytes.len(), 12);
    assert_eq!(Row::decode(&schema, &bytes).unwrap(), row);
}

#[test]
fn test_decode_truncated_buffer() {
    let schema = users_schema();
    let bytes = Row::new(vec![Value::Int32(7), Value::Text("Bob".to_string())])
        .encode(&schema)
        .unwrap();

    for cut in [2, 6, 10, bytes.len() - 1] {
        assert!(
            matches!(
                Row::decode(&schema, &bytes[..cut]),
                Err(DatabaseError::DecodeOverflow { .. })
            ),
            "cut at {} should overflow",
            cut
        );
    }
}

#[test]
fn test_decode_declared_length_past_end() {
    let schema = users_schema();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&ROW_FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&1i32.to_le_bytes());
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(b"abc");

    assert!(matches!(
        Row::decode(&schema, &bytes),
        Err(DatabaseError::DecodeOverflow { .. })
    ));
}

#[test]
fn test_decode_rejects_unknown_version() {
    let schema = users_schema();
    let mut bytes = Row::new(vec![Value::Int32(1), Value::Text("a".to_string())])
        .encode(&schema)
        .unwrap();
    bytes[0..4].copy_from_slice(&2u32.to_le_bytes());

    match Row::decode(&schema, &bytes) {
        Err(DatabaseError::UnsupportedRowVersion { version }) => assert_eq!(version, 2),
        other => panic!("Expected UnsupportedRowVersion, got {:?}", other),
    }
}

#[test]
fn test_encode_type_mismatch() {
    let schema = users_schema();

    let swapped = Row::new(vec![Value::Text("1".to_string()), Value::Int32(1)]);
    match swapped.encode(&schema) {
        Err(DatabaseError::TypeMismatch { column, .. }) => assert_eq!(column, "id"),
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }

    let short = Row::new(vec![Value::Int32(1)]);
    assert!(matches!(
        short.encode(&schema),
        Err(DatabaseError::TypeMismatch { .. })
    ));
}

#[test]
fn test_render() {
    let schema = users_schema();
    let row = Row::new(vec![Value::Int32(1), Value::Text("Alice".to_string())]);
    assert_eq!(row.render(&schema), r#"{ id=1, name="Alice" }"#);
}

#[test]
fn test_get_and_set_value() {
    let mut row = Row::new(vec![Value::Int32(1), Value::Text("a".to_string())]);
    assert_eq!(row.get_value(0), Some(&Value::Int32(1)));
    assert_eq!(row.get_value(2), None);

    row.set_value(1, Value::Text("b".to_string())).unwrap();
    assert_eq!(row.get_value(1), Some(&Value::Text("b".to_string())));
    assert!(matches!(
        row.set_value(5, Value::Int32(0)),
        Err(DatabaseError::InvalidData { .. })
    ));
}

#[test]
fn test_row_location_display() {
    let location = RowLocation::new(3, 17);
    assert_eq!(location.to_string(), "(3, 17)");
    assert!(RowLocation::new(0, 5) < RowLocation::new(1, 0));
}
