use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    storage::schema::TableSchema,
    types::{
        PageId, ROW_FORMAT_VERSION, SlotId,
        error::DatabaseError,
        value::{DataType, Value},
    },
};

/// Physical address of a row inside a table's heap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowLocation {
    #[serde(rename = "page")]
    pub page_id: PageId,
    #[serde(rename = "slot")]
    pub slot_id: SlotId,
}

impl RowLocation {
    pub fn new(page_id: PageId, slot_id: SlotId) -> Self {
        Self { page_id, slot_id }
    }
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page_id, self.slot_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get_value(&self, column_index: usize) -> Option<&Value> {
        self.values.get(column_index)
    }

    pub fn set_value(&mut self, column_index: usize, value: Value) -> Result<(), DatabaseError> {
        let slot = self
            .values
            .get_mut(column_index)
            .ok_or_else(|| DatabaseError::InvalidData {
                details: format!("Column index {} out of bounds", column_index),
            })?;
        *slot = value;
        Ok(())
    }

    /// Encoded size in bytes, version tag included.
    pub fn size(&self) -> usize {
        4 + self
            .values
            .iter()
            .map(|value| value.serialized_size())
            .sum::<usize>()
    }

    /// Encode against `schema`: `[u32 version][field]...`, INT32 as 4 bytes,
    /// TEXT as `[u32 len][bytes]`.
    pub fn encode(&self, schema: &TableSchema) -> Result<Vec<u8>, DatabaseError> {
        schema.validate_row(self)?;

        let mut buffer = Vec::with_capacity(self.size());
        buffer.extend_from_slice(&ROW_FORMAT_VERSION.to_le_bytes());

        for value in &self.values {
            match value {
                Value::Int32(i) => buffer.extend_from_slice(&i.to_le_bytes()),
                Value::Text(s) => {
                    let length = u32::try_from(s.len()).map_err(|_| DatabaseError::InvalidData {
                        details: format!("Text value of {} bytes is too long", s.len()),
                    })?;
                    buffer.extend_from_slice(&length.to_le_bytes());
                    buffer.extend_from_slice(s.as_bytes());
                }
            }
        }

        Ok(buffer)
    }

    pub fn decode(schema: &TableSchema, bytes: &[u8]) -> Result<Self, DatabaseError> {
        let mut cursor = 0;

        let version = read_u32(bytes, &mut cursor, "row version")?;
        if version != ROW_FORMAT_VERSION {
            return Err(DatabaseError::UnsupportedRowVersion { version });
        }

        let mut values = Vec::with_capacity(schema.columns.len());
        for column in &schema.columns {
            let value = match column.data_type {
                DataType::Int32 => {
                    let raw = read_u32(bytes, &mut cursor, &column.name)?;
                    Value::Int32(raw as i32)
                }
                DataType::Text => {
                    let length = read_u32(bytes, &mut cursor, &column.name)? as usize;
                    let end = cursor
                        .checked_add(length)
                        .filter(|end| *end <= bytes.len())
                        .ok_or_else(|| DatabaseError::DecodeOverflow {
                            details: format!(
                                "TEXT column '{}' declares {} bytes at offset {}, buffer is {} bytes",
                                column.name,
                                length,
                                cursor,
                                bytes.len()
                            ),
                        })?;
                    let text = String::from_utf8(bytes[cursor..end].to_vec()).map_err(|_| {
                        DatabaseError::InvalidData {
                            details: format!("Invalid UTF-8 in TEXT column '{}'", column.name),
                        }
                    })?;
                    cursor = end;
                    Value::Text(text)
                }
            };
            values.push(value);
        }

        Ok(Row { values })
    }

    /// Human readable form, e.g. `{ id=1, name="Alice" }`.
    pub fn render(&self, schema: &TableSchema) -> String {
        let fields: Vec<String> = schema
            .columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| format!("{}={}", column.name, value))
            .collect();
        format!("{{ {} }}", fields.join(", "))
    }
}

fn read_u32(bytes: &[u8], cursor: &mut usize, what: &str) -> Result<u32, DatabaseError> {
    let start = *cursor;
    let chunk = bytes
        .get(start..start + 4)
        .ok_or_else(|| DatabaseError::DecodeOverflow {
            details: format!(
                "reading {} at offset {} past end of {} byte buffer",
                what,
                start,
                bytes.len()
            ),
        })?;
    *cursor += 4;
    Ok(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}
