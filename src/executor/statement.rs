use serde::{Deserialize, Serialize};

use crate::{storage::schema::TableSchema, types::value::Value};

/// Structured statements accepted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    CreateTable {
        schema: TableSchema,
    },
    Insert {
        table: String,
        values: Vec<Value>,
    },
    SelectAll {
        table: String,
    },
    SelectWhere {
        table: String,
        column: String,
        value: Value,
    },
    UpdateWhere {
        table: String,
        set_column: String,
        set_value: Value,
        where_column: String,
        where_value: Value,
    },
    DeleteWhere {
        table: String,
        where_column: String,
        where_value: Value,
    },
    Join {
        left_table: String,
        right_table: String,
        left_column: String,
        right_column: String,
    },
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::CreateTable { .. } => "create_table",
            Statement::Insert { .. } => "insert",
            Statement::SelectAll { .. } => "select_all",
            Statement::SelectWhere { .. } => "select_where",
            Statement::UpdateWhere { .. } => "update_where",
            Statement::DeleteWhere { .. } => "delete_where",
            Statement::Join { .. } => "join",
        }
    }
}
