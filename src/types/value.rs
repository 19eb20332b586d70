use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::error::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int32,
    Text,
}

impl DataType {
    /// Type code used by the schema file format.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(DataType::Int32),
            2 => Some(DataType::Text),
            _ => None,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            DataType::Int32 => 1,
            DataType::Text => 2,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int32 => write!(f, "INT32"),
            DataType::Text => write!(f, "TEXT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    Text(String),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int32(_) => DataType::Int32,
            Value::Text(_) => DataType::Text,
        }
    }

    pub fn is_compatible_with_type(&self, data_type: &DataType) -> bool {
        self.data_type() == *data_type
    }

    /// Canonical key for equality checks and hash index lookups.
    pub fn to_key(&self) -> String {
        match self {
            Value::Int32(i) => i.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Bytes this value occupies in an encoded row.
    pub fn serialized_size(&self) -> usize {
        match self {
            Value::Int32(_) => 4,
            Value::Text(s) => 4 + s.len(),
        }
    }

    /// Check that `self` may be stored in `column` of type `data_type`.
    pub fn expect_type(&self, column: &str, data_type: &DataType) -> Result<(), DatabaseError> {
        if self.is_compatible_with_type(data_type) {
            Ok(())
        } else {
            Err(DatabaseError::TypeMismatch {
                column: column.to_string(),
                expected: data_type.to_string(),
                actual: self.data_type().to_string(),
            })
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}
