use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{error::DatabaseError, row::Row, value::DataType};

/// Represents a column definition in a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Table name plus ordered columns. Column order is both the encoding order
/// and the tuple order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Get column index by name
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    /// Like `get_column_index`, but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, DatabaseError> {
        self.get_column_index(name)
            .ok_or_else(|| DatabaseError::ColumnNotFound {
                name: name.to_string(),
                table: self.table_name.clone(),
            })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Names must survive the line-based schema file and double as file names.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if !is_valid_identifier(&self.table_name) {
            return Err(DatabaseError::SchemaInvalid {
                details: format!("Invalid table name '{}'", self.table_name),
            });
        }
        if self.columns.is_empty() {
            return Err(DatabaseError::SchemaInvalid {
                details: "Table must have at least one column".to_string(),
            });
        }

        let mut column_names = HashSet::new();
        for column in &self.columns {
            if !is_valid_identifier(&column.name) {
                return Err(DatabaseError::SchemaInvalid {
                    details: format!("Invalid column name '{}'", column.name),
                });
            }
            if !column_names.insert(column.name.as_str()) {
                return Err(DatabaseError::SchemaInvalid {
                    details: format!("Duplicate column name: {}", column.name),
                });
            }
        }

        Ok(())
    }

    /// Validate a row against this schema
    pub fn validate_row(&self, row: &Row) -> Result<(), DatabaseError> {
        if row.values.len() != self.columns.len() {
            return Err(DatabaseError::TypeMismatch {
                column: self.table_name.clone(),
                expected: format!("{} values", self.columns.len()),
                actual: format!("{} values", row.values.len()),
            });
        }

        for (column, value) in self.columns.iter().zip(&row.values) {
            value.expect_type(&column.name, &column.data_type)?;
        }

        Ok(())
    }

    /// Text form stored in `<table>.schema`:
    /// table name, column count, then `name typeCode` per line.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{}\n", self.table_name, self.columns.len());
        for column in &self.columns {
            out.push_str(&format!("{} {}\n", column.name, column.data_type.code()));
        }
        out
    }

    pub fn from_text(table: &str, text: &str) -> Result<Self, DatabaseError> {
        let corrupted = |reason: String| DatabaseError::CorruptedSchema {
            table: table.to_string(),
            reason,
        };

        let mut lines = text.lines();
        let table_name = lines
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| corrupted("missing table name".to_string()))?
            .to_string();
        if table_name != table {
            return Err(corrupted(format!(
                "file names table '{}', expected '{}'",
                table_name, table
            )));
        }

        let count_line = lines
            .next()
            .ok_or_else(|| corrupted("missing column count".to_string()))?;
        let column_count: usize = count_line
            .trim()
            .parse()
            .map_err(|_| corrupted(format!("invalid column count '{}'", count_line)))?;

        let mut columns = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let line = lines
                .next()
                .ok_or_else(|| corrupted(format!("missing definition for column {}", index)))?;
            let mut parts = line.split_whitespace();
            let (Some(name), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(corrupted(format!("malformed column line '{}'", line)));
            };
            let data_type = code
                .parse::<u32>()
                .ok()
                .and_then(DataType::from_code)
                .ok_or_else(|| corrupted(format!("unknown type code '{}'", code)))?;
            columns.push(ColumnSchema::new(name, data_type));
        }

        let schema = Self {
            table_name,
            columns,
        };
        schema.validate().map_err(|err| match err {
            DatabaseError::SchemaInvalid { details } => corrupted(details),
            other => other,
        })?;
        Ok(schema)
    }
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\' || c.is_control())
}

/// Builder for creating table schemas
pub struct TableSchemaBuilder {
    table_name: String,
    columns: Vec<ColumnSchema>,
}

impl TableSchemaBuilder {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(ColumnSchema::new(name, data_type));
        self
    }

    pub fn int_column(self, name: impl Into<String>) -> Self {
        self.add_column(name, DataType::Int32)
    }

    pub fn text_column(self, name: impl Into<String>) -> Self {
        self.add_column(name, DataType::Text)
    }

    pub fn build(self) -> TableSchema {
        TableSchema::new(self.table_name, self.columns)
    }
}
