use thiserror::Error;

use crate::planner::error::PlannerError;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page is full (needed {needed} bytes, {available} available)")]
    PageFull { needed: usize, available: usize },

    #[error("Cannot store an empty row")]
    EmptyRow,

    #[error("Row of {size} bytes exceeds the {max} bytes an empty page can hold")]
    RowTooLarge { size: usize, max: usize },

    #[error("Invalid page size: {expected} bytes, got {actual} bytes")]
    InvalidPageSize { expected: usize, actual: usize },

    #[error("Row decode overflow: {details}")]
    DecodeOverflow { details: String },

    #[error("Unsupported row format version {version}")]
    UnsupportedRowVersion { version: u32 },

    #[error("Invalid data: {details}")]
    InvalidData { details: String },

    #[error("Table '{name}' not found")]
    TableNotFound { name: String },

    #[error("Column '{name}' not found in table '{table}'")]
    ColumnNotFound { name: String, table: String },

    #[error("Type mismatch on column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid schema: {details}")]
    SchemaInvalid { details: String },

    #[error("Corrupted schema for table '{table}': {reason}")]
    CorruptedSchema { table: String, reason: String },

    #[error("SQL parsing error: {details}")]
    SqlParseError { details: String },

    #[error("Unsupported SQL: {details}")]
    UnsupportedStatement { details: String },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl From<PlannerError> for DatabaseError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::UnsupportedStatement(details) => {
                DatabaseError::UnsupportedStatement { details }
            }
            other => DatabaseError::SqlParseError {
                details: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
