use lembar::types::{
    error::DatabaseError,
    value::{DataType, Value},
};

#[test]
fn test_canonical_keys() {
    assert_eq!(Value::Int32(42).to_key(), "42");
    assert_eq!(Value::Int32(-7).to_key(), "-7");
    assert_eq!(Value::Text("Alice".to_string()).to_key(), "Alice");
    // INT32 1 and TEXT "1" share a key
    assert_eq!(Value::Int32(1).to_key(), Value::Text("1".to_string()).to_key());
}

#[test]
fn test_data_types() {
    assert_eq!(Value::Int32(0).data_type(), DataType::Int32);
    assert_eq!(Value::from("x").data_type(), DataType::Text);
    assert!(Value::Int32(0).is_compatible_with_type(&DataType::Int32));
    assert!(!Value::Int32(0).is_compatible_with_type(&DataType::Text));
}

#[test]
fn test_type_codes() {
    assert_eq!(DataType::Int32.code(), 1);
    assert_eq!(DataType::Text.code(), 2);
    assert_eq!(DataType::from_code(1), Some(DataType::Int32));
    assert_eq!(DataType::from_code(2), Some(DataType::Text));
    assert_eq!(DataType::from_code(3), None);
    assert_eq!(DataType::Int32.to_string(), "INT32");
}

#[test]
fn test_serialized_size() {
    assert_eq!(Value::Int32(i32::MIN).serialized_size(), 4);
    assert_eq!(Value::from("abc").serialized_size(), 7);
    assert_eq!(Value::from(String::new()).serialized_size(), 4);
}

#[test]
fn test_display() {
    assert_eq!(Value::Int32(5).to_string(), "5");
    assert_eq!(Value::from("Bob").to_string(), "\"Bob\"");
}

#[test]
fn test_expect_type() {
    assert!(Value::from(3).expect_type("id", &DataType::Int32).is_ok());
    match Value::from(3).expect_type("name", &DataType::Text) {
        Err(DatabaseError::TypeMismatch {
            column,
            expected,
            actual,
        }) => {
            assert_eq!(column, "name");
            assert_eq!(expected, "TEXT");
            assert_eq!(actual, "INT32");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}
