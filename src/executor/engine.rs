use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    executor::{
        index_manager::IndexManager,
        result::{ExecResult, Outcome},
        scan::ScanIterator,
        sequential_scan::SequentialScanner,
        statement::Statement,
    },
    planner::parser::SqlParser,
    storage::{catalog::Catalog, heap_file::HeapFile, schema::TableSchema, wal::WriteLog},
    types::{
        error::DatabaseError,
        row::{Row, RowLocation},
    },
};

/// Executes statements against the tables of one data directory.
///
/// Every statement runs to completion before `execute` returns; all
/// failures come back as an `ExecResult` with `ok == false`.
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) catalog: Catalog,
    pub(crate) wal: WriteLog,
    pub(crate) indexes: IndexManager,
}

impl Engine {
    pub fn open(config: EngineConfig) -> Result<Self, DatabaseError> {
        config.validate()?;
        let catalog = Catalog::open(&config.data_dir)?;
        let wal = WriteLog::open(config.wal_path(), config.sync_wal)?;
        info!(data_dir = %config.data_dir.display(), "engine opened");
        Ok(Self {
            config,
            catalog,
            wal,
            indexes: IndexManager::new(),
        })
    }

    pub fn open_dir<P: AsRef<Path>>(data_dir: P) -> Result<Self, DatabaseError> {
        Self::open(EngineConfig::with_data_dir(data_dir))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn indexes(&self) -> &IndexManager {
        &self.indexes
    }

    pub fn wal_path(&self) -> &Path {
        self.wal.path()
    }

    pub fn execute(&mut self, statement: Statement) -> ExecResult {
        let kind = statement.kind();
        match self.try_execute(statement) {
            Ok(outcome) => {
                debug!(statement = kind, "statement succeeded");
                ExecResult::success(outcome)
            }
            Err(e) => {
                warn!(statement = kind, error = %e, "statement failed");
                ExecResult::failure(e.to_string())
            }
        }
    }

    /// Parse `sql` and execute it. Text the planner does not recognise is an
    /// "unsupported" failure.
    pub fn execute_sql(&mut self, sql: &str) -> ExecResult {
        match SqlParser::new().parse(sql) {
            Ok(statement) => self.execute(statement),
            Err(e) => {
                let e = DatabaseError::from(e);
                warn!(error = %e, "could not plan statement");
                ExecResult::failure(e.to_string())
            }
        }
    }

    pub fn try_execute(&mut self, statement: Statement) -> Result<Outcome, DatabaseError> {
        match statement {
            Statement::CreateTable { schema } => self.create_table(schema),
            Statement::Insert { table, values } => self.insert(&table, values),
            Statement::Join {
                left_table,
                right_table,
                left_column,
                right_column,
            } => self.join(&left_table, &right_table, &left_column, &right_column),
            Statement::SelectWhere {
                table,
                column,
                value,
            } => self.select_where(&table, &column, &value),
            Statement::SelectAll { table } => self.select_all(&table),
            Statement::UpdateWhere {
                table,
                set_column,
                set_value,
                where_column,
                where_value,
            } => self.update_where(&table, &set_column, set_value, &where_column, &where_value),
            Statement::DeleteWhere {
                table,
                where_column,
                where_value,
            } => self.delete_where(&table, &where_column, &where_value),
        }
    }

    /// Schema and heap file of an existing table.
    pub(crate) fn table_context(&self, table: &str) -> Result<(TableSchema, HeapFile), DatabaseError> {
        let schema = self.catalog.require_table(table)?;
        let heap = self.catalog.heap_file(table)?;
        Ok((schema, heap))
    }

    /// Every live row of `table`, decoded, in physical order.
    pub fn scan_table(&self, table: &str) -> Result<Vec<(RowLocation, Row)>, DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        ScanIterator::new(SequentialScanner::new(heap, None))
            .map(|scanned| {
                let scanned = scanned?;
                let row = Row::decode(&schema, &scanned.bytes)?;
                Ok((scanned.location, row))
            })
            .collect()
    }

    /// Force a full-rescan rebuild of the table's indexes.
    pub fn rebuild_indexes(&mut self, table: &str) -> Result<(), DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        self.indexes.rebuild(&schema, &heap)
    }
}
