//! SQL text to [`Statement`].
//!
//! Only the narrow dialect the engine executes is accepted:
//!
//! ```text
//! CREATE TABLE t (col INT, col TEXT, ...)
//! INSERT INTO t VALUES (1, "text", ...)
//! SELECT * FROM a [INNER] JOIN b ON a.x = b.y
//! SELECT * FROM t WHERE col = value
//! SELECT * FROM t
//! UPDATE t SET col = value WHERE col = value
//! DELETE FROM t WHERE col = value
//! ```
//!
//! String literals may use single or double quotes.

use sqlparser::{
    ast::{
        self, AssignmentTarget, BinaryOperator, DataType as SqlDataType, Expr, FromTable,
        JoinConstraint, JoinOperator, ObjectName, Query, SelectItem, SetExpr, TableFactor,
        TableObject, TableWithJoins, UnaryOperator, Value as SqlValue,
    },
    dialect::GenericDialect,
    parser::Parser,
};

use crate::{
    executor::statement::Statement,
    planner::error::PlannerError,
    storage::schema::{ColumnSchema, TableSchema},
    types::value::{DataType, Value},
};

pub struct SqlParser;

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, sql: &str) -> Result<Statement, PlannerError> {
        let dialect = GenericDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        if statements.len() != 1 {
            return Err(PlannerError::InvalidQuery(
                "Expected exactly one statement".to_string(),
            ));
        }

        self.to_statement(&statements[0])
    }

    fn to_statement(&self, statement: &ast::Statement) -> Result<Statement, PlannerError> {
        match statement {
            ast::Statement::CreateTable(create) => {
                let columns = create
                    .columns
                    .iter()
                    .map(|column| {
                        Ok(ColumnSchema::new(
                            column.name.value.clone(),
                            self.convert_data_type(&column.data_type)?,
                        ))
                    })
                    .collect::<Result<Vec<_>, PlannerError>>()?;
                Ok(Statement::CreateTable {
                    schema: TableSchema::new(object_name(&create.name)?, columns),
                })
            }
            ast::Statement::Insert(insert) => {
                let table = match &insert.table {
                    TableObject::TableName(name) => object_name(name)?,
                    other => {
                        return Err(PlannerError::UnsupportedStatement(format!(
                            "INSERT INTO {}",
                            other
                        )));
                    }
                };
                if !insert.columns.is_empty() {
                    return Err(PlannerError::InvalidQuery(
                        "INSERT column lists are not supported".to_string(),
                    ));
                }
                let values = match insert.source.as_deref() {
                    Some(source) => self.insert_values(source)?,
                    None => {
                        return Err(PlannerError::InvalidQuery(
                            "INSERT needs a VALUES list".to_string(),
                        ));
                    }
                };
                Ok(Statement::Insert { table, values })
            }
            ast::Statement::Query(query) => self.query_to_statement(query),
            ast::Statement::Update {
                table,
                assignments,
                selection,
                ..
            } => {
                let table = single_table(table)?;
                let [assignment] = assignments.as_slice() else {
                    return Err(PlannerError::InvalidQuery(
                        "UPDATE must set exactly one column".to_string(),
                    ));
                };
                let set_column = match &assignment.target {
                    AssignmentTarget::ColumnName(name) => object_name(name)?,
                    other => {
                        return Err(PlannerError::InvalidQuery(format!(
                            "cannot assign to '{}'",
                            other
                        )));
                    }
                };
                let set_value = literal(&assignment.value)?;
                let (where_column, where_value) = equality(selection.as_ref())?;
                Ok(Statement::UpdateWhere {
                    table,
                    set_column,
                    set_value,
                    where_column,
                    where_value,
                })
            }
            ast::Statement::Delete(delete) => {
                let tables = match &delete.from {
                    FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
                };
                let [table] = tables.as_slice() else {
                    return Err(PlannerError::InvalidQuery(
                        "DELETE must name exactly one table".to_string(),
                    ));
                };
                let table = single_table(table)?;
                let (where_column, where_value) = equality(delete.selection.as_ref())?;
                Ok(Statement::DeleteWhere {
                    table,
                    where_column,
                    where_value,
                })
            }
            _ => Err(PlannerError::UnsupportedStatement(statement.to_string())),
        }
    }

    /// `SELECT * FROM t [WHERE c = v]` or `SELECT * FROM a JOIN b ON a.x = b.y`.
    fn query_to_statement(&self, query: &Query) -> Result<Statement, PlannerError> {
        let SetExpr::Select(select) = query.body.as_ref() else {
            return Err(PlannerError::UnsupportedStatement(query.to_string()));
        };
        if !matches!(select.projection.as_slice(), [SelectItem::Wildcard(_)]) {
            return Err(PlannerError::InvalidQuery(
                "only SELECT * is supported".to_string(),
            ));
        }
        let [from] = select.from.as_slice() else {
            return Err(PlannerError::InvalidQuery(
                "SELECT must read exactly one table or join".to_string(),
            ));
        };
        let left_table = table_name(&from.relation)?;

        match from.joins.as_slice() {
            [] => match &select.selection {
                None => Ok(Statement::SelectAll { table: left_table }),
                Some(selection) => {
                    let (column, value) = equality(Some(selection))?;
                    Ok(Statement::SelectWhere {
                        table: left_table,
                        column,
                        value,
                    })
                }
            },
            [join] => {
                if select.selection.is_some() {
                    return Err(PlannerError::InvalidQuery(
                        "JOIN with WHERE is not supported".to_string(),
                    ));
                }
                let right_table = table_name(&join.relation)?;
                let JoinOperator::Inner(JoinConstraint::On(on)) = &join.join_operator else {
                    return Err(PlannerError::InvalidQuery(
                        "only INNER JOIN ... ON is supported".to_string(),
                    ));
                };
                let (left_column, right_column) = join_columns(on, &left_table, &right_table)?;
                Ok(Statement::Join {
                    left_table,
                    right_table,
                    left_column,
                    right_column,
                })
            }
            _ => Err(PlannerError::InvalidQuery(
                "only a single JOIN is supported".to_string(),
            )),
        }
    }

    fn insert_values(&self, source: &Query) -> Result<Vec<Value>, PlannerError> {
        let SetExpr::Values(values) = source.body.as_ref() else {
            return Err(PlannerError::InvalidQuery(
                "INSERT needs a VALUES list".to_string(),
            ));
        };
        let [row] = values.rows.as_slice() else {
            return Err(PlannerError::InvalidQuery(
                "INSERT takes exactly one row".to_string(),
            ));
        };
        row.iter().map(literal).collect()
    }

    fn convert_data_type(&self, sql_type: &SqlDataType) -> Result<DataType, PlannerError> {
        match sql_type {
            SqlDataType::Int(_) | SqlDataType::Integer(_) | SqlDataType::Int32 => Ok(DataType::Int32),
            SqlDataType::Text | SqlDataType::Varchar(_) | SqlDataType::String(_) => Ok(DataType::Text),
            _ => Err(PlannerError::UnsupportedDataType(sql_type.to_string())),
        }
    }
}

fn object_name(name: &ObjectName) -> Result<String, PlannerError> {
    match name.0.as_slice() {
        [ident] => Ok(ident.value.clone()),
        _ => Err(PlannerError::InvalidQuery(format!(
            "qualified name '{}' is not supported",
            name
        ))),
    }
}

fn table_name(factor: &TableFactor) -> Result<String, PlannerError> {
    match factor {
        TableFactor::Table { name, .. } => object_name(name),
        other => Err(PlannerError::InvalidQuery(format!(
            "'{}' is not a table",
            other
        ))),
    }
}

fn single_table(table: &TableWithJoins) -> Result<String, PlannerError> {
    if !table.joins.is_empty() {
        return Err(PlannerError::InvalidQuery(
            "joins are only supported in SELECT".to_string(),
        ));
    }
    table_name(&table.relation)
}

/// `column = literal`, the only predicate the engine evaluates.
fn equality(selection: Option<&Expr>) -> Result<(String, Value), PlannerError> {
    match selection {
        Some(Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        }) => match left.as_ref() {
            Expr::Identifier(ident) if ident.quote_style.is_none() => {
                Ok((ident.value.clone(), literal(right)?))
            }
            other => Err(PlannerError::InvalidQuery(format!(
                "expected a column name, found '{}'",
                other
            ))),
        },
        Some(other) => Err(PlannerError::InvalidQuery(format!(
            "only 'column = value' is supported, found '{}'",
            other
        ))),
        None => Err(PlannerError::InvalidQuery(
            "a WHERE clause is required".to_string(),
        )),
    }
}

/// `a.x = b.y`, in either order, as `(left column, right column)`.
fn join_columns(
    on: &Expr,
    left_table: &str,
    right_table: &str,
) -> Result<(String, String), PlannerError> {
    let Expr::BinaryOp {
        left,
        op: BinaryOperator::Eq,
        right,
    } = on
    else {
        return Err(PlannerError::InvalidQuery(format!(
            "join condition must be an equality, found '{}'",
            on
        )));
    };
    let (first_table, first_column) = column_ref(left)?;
    let (second_table, second_column) = column_ref(right)?;

    // `ON b.y = a.x` names the right table first.
    let swapped = first_table.as_deref() == Some(right_table)
        && second_table.as_deref() == Some(left_table)
        && left_table != right_table;
    let (left_ref, right_ref) = if swapped {
        ((second_table, second_column), (first_table, first_column))
    } else {
        ((first_table, first_column), (second_table, second_column))
    };

    for (qualifier, table) in [(&left_ref.0, left_table), (&right_ref.0, right_table)] {
        if let Some(qualifier) = qualifier {
            if qualifier != table {
                return Err(PlannerError::InvalidQuery(format!(
                    "join column qualifier '{}' does not name a joined table",
                    qualifier
                )));
            }
        }
    }
    Ok((left_ref.1, right_ref.1))
}

/// `column` or `table.column`.
fn column_ref(expr: &Expr) -> Result<(Option<String>, String), PlannerError> {
    match expr {
        Expr::Identifier(ident) => Ok((None, ident.value.clone())),
        Expr::CompoundIdentifier(parts) => match parts.as_slice() {
            [table, column] => Ok((Some(table.value.clone()), column.value.clone())),
            _ => Err(PlannerError::InvalidQuery(format!(
                "unsupported column reference '{}'",
                expr
            ))),
        },
        other => Err(PlannerError::InvalidQuery(format!(
            "expected a column reference, found '{}'",
            other
        ))),
    }
}

fn literal(expr: &Expr) -> Result<Value, PlannerError> {
    match expr {
        Expr::Value(SqlValue::Number(digits, _)) => parse_int(digits),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => match expr.as_ref() {
            Expr::Value(SqlValue::Number(digits, _)) => parse_int(&format!("-{}", digits)),
            other => Err(PlannerError::InvalidQuery(format!(
                "cannot negate '{}'",
                other
            ))),
        },
        Expr::Value(SqlValue::SingleQuotedString(s))
        | Expr::Value(SqlValue::DoubleQuotedString(s)) => Ok(Value::Text(s.clone())),
        // GenericDialect reads "text" as a quoted identifier.
        Expr::Identifier(ident) if ident.quote_style.is_some() => Ok(Value::Text(ident.value.clone())),
        other => Err(PlannerError::InvalidQuery(format!(
            "expected literal value, found '{}'",
            other
        ))),
    }
}

fn parse_int(literal: &str) -> Result<Value, PlannerError> {
    literal
        .parse::<i32>()
        .map(Value::Int32)
        .map_err(|_| PlannerError::InvalidQuery(format!("'{}' is not an INT32", literal)))
}
