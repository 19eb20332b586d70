use std::collections::HashMap;

use tracing::debug;

use crate::{
    executor::sequential_scan::SequentialScanner,
    storage::{hash_index::HashIndex, heap_file::HeapFile, schema::TableSchema},
    types::{
        error::DatabaseError,
        row::{Row, RowLocation},
    },
};

type TableIndexes = HashMap<String, HashIndex>;

/// Per-table, per-column hash indexes owned by one engine instance.
///
/// Indexes for a table are built lazily from a full scan the first time the
/// table is touched, extended on INSERT, and thrown away and rebuilt after
/// every UPDATE or DELETE.
#[derive(Debug, Default)]
pub struct IndexManager {
    tables: HashMap<String, TableIndexes>,
}

impl IndexManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn ensure_built(
        &mut self,
        schema: &TableSchema,
        heap: &HeapFile,
    ) -> Result<(), DatabaseError> {
        if self.is_built(&schema.table_name) {
            return Ok(());
        }
        self.rebuild(schema, heap)
    }

    /// Replace every index of the table with one built from a fresh scan.
    pub fn rebuild(&mut self, schema: &TableSchema, heap: &HeapFile) -> Result<(), DatabaseError> {
        let mut indexes: TableIndexes = schema
            .columns
            .iter()
            .map(|column| (column.name.clone(), HashIndex::new()))
            .collect();

        let scanned = SequentialScanner::new(heap.clone(), None).scan_all()?;
        let row_count = scanned.len();
        for scanned_row in scanned {
            let row = Row::decode(schema, &scanned_row.bytes)?;
            add_to(&mut indexes, schema, &row, scanned_row.location);
        }

        debug!(table = %schema.table_name, rows = row_count, "rebuilt indexes");
        self.tables.insert(schema.table_name.clone(), indexes);
        Ok(())
    }

    pub fn index(&self, table: &str, column: &str) -> Option<&HashIndex> {
        self.tables.get(table)?.get(column)
    }

    /// Locations currently indexed under `key`. The table's indexes must be
    /// built; a column without an index is `ColumnNotFound`.
    pub fn lookup(
        &self,
        table: &str,
        column: &str,
        key: &str,
    ) -> Result<Vec<RowLocation>, DatabaseError> {
        self.index(table, column)
            .map(|index| index.find(key).to_vec())
            .ok_or_else(|| DatabaseError::ColumnNotFound {
                name: column.to_string(),
                table: table.to_string(),
            })
    }

    /// Index a freshly inserted row under every column.
    pub fn add_row(&mut self, schema: &TableSchema, row: &Row, location: RowLocation) {
        if let Some(indexes) = self.tables.get_mut(&schema.table_name) {
            add_to(indexes, schema, row, location);
        }
    }

    pub fn invalidate(&mut self, table: &str) {
        self.tables.remove(table);
    }
}

fn add_to(indexes: &mut TableIndexes, schema: &TableSchema, row: &Row, location: RowLocation) {
    for (column, value) in schema.columns.iter().zip(&row.values) {
        if let Some(index) = indexes.get_mut(&column.name) {
            index.add(value.to_key(), location);
        }
    }
}
